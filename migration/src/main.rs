use sea_orm_migration::prelude::*;
use std::env;

#[tokio::main]
async fn main() {
    // 未设置 DATABASE_URL 时使用与服务默认配置相同的库文件
    if env::var("DATABASE_URL").is_err() {
        let in_migration_dir = env::current_dir()
            .map(|dir| dir.ends_with("migration"))
            .unwrap_or(false);
        let db_path = if in_migration_dir {
            "../data/sky_takeout.db"
        } else {
            "data/sky_takeout.db"
        };
        unsafe {
            env::set_var("DATABASE_URL", format!("sqlite://{db_path}?mode=rwc"));
        }
    }
    cli::run_cli(migration::Migrator).await;
}
