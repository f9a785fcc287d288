//! # Sky Takeout 主程序
//!
//! 加载配置、连接数据库并执行迁移，然后启动 HTTP 服务

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sky_takeout::{
    Result, TakeoutError, config, database, logging, management::ManagementServer,
};
use tracing::{error, info};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "sky-takeout", version, about = "Sky Takeout business core")]
struct Cli {
    /// 配置文件路径，默认 `config/config.{RUST_ENV}.toml`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别（`RUST_LOG` 优先）
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 只执行数据库迁移，不启动服务
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(Some(&cli.log_level));

    if let Err(e) = run(cli).await {
        error!(error = ?e, "服务启动失败");
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;

    let db = database::init_database(&config.database).await?;
    let pending = database::check_database_status(&db)
        .await
        .map_err(|e| TakeoutError::database_with_source("读取迁移状态失败", e))?;
    info!(pending, "Checked pending migrations");
    database::run_migrations(&db)
        .await
        .map_err(|e| TakeoutError::database_with_source("数据库迁移失败", e))?;

    if cli.migrate_only {
        info!("Migrations applied, exiting");
        return Ok(());
    }

    let server = ManagementServer::new(&config, Arc::new(db))?;
    server.serve().await
}
