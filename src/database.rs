//! # 数据库模块
//!
//! 数据库连接和迁移管理

use crate::config::DatabaseConfig;
use crate::error::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{error, info, warn};

/// 初始化数据库连接
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    config.ensure_database_path()?;

    info!(url = %log_safe_url(&config.url), "Connecting to database");

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);
    // 内存库的每个连接都是独立数据库
    if config.is_memory_database() {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(config.max_connections);
    }

    let db = Database::connect(options)
        .await
        .context("Failed to connect database")?;

    info!("Database connected");
    Ok(db)
}

/// 日志中只保留连接串的前 50 个字符
fn log_safe_url(url: &str) -> String {
    url.chars().take(50).collect()
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> std::result::Result<(), DbErr> {
    info!("Running database migrations");

    match ::migration::Migrator::up(db, None).await {
        Ok(()) => {
            info!("Database migrations applied");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Database migration failed");
            Err(e)
        }
    }
}

/// 检查数据库状态
pub async fn check_database_status(db: &DatabaseConnection) -> std::result::Result<usize, DbErr> {
    let pending = ::migration::Migrator::get_pending_migrations(db).await?;

    if pending.is_empty() {
        info!("All migrations applied");
    } else {
        warn!(count = pending.len(), "Pending migrations found");
    }

    Ok(pending.len())
}
