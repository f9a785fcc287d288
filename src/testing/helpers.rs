//! # 测试辅助函数

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;

/// 创建已迁移的内存数据库
pub async fn create_test_db() -> Result<Arc<DatabaseConnection>, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Arc::new(db))
}

/// 创建临时数据库文件，`TempDir` 被丢弃时文件随之删除
pub async fn create_temp_db() -> Result<(Arc<DatabaseConnection>, TempDir), DbErr> {
    let temp_dir =
        tempfile::tempdir().map_err(|e| DbErr::Custom(format!("创建临时目录失败: {e}")))?;

    let db_path = temp_dir.path().join("test.db");
    let db = Database::connect(format!("sqlite://{}?mode=rwc", db_path.display())).await?;
    migration::Migrator::up(&db, None).await?;

    Ok((Arc::new(db), temp_dir))
}

/// `2024-03-05 10:30:00` 形式的 UTC 时间
#[must_use]
pub fn utc(date: (i32, u32, u32), hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .and_then(|day| day.and_hms_opt(hour, minute, 0))
        .expect("valid test timestamp")
}
