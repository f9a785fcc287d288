//! # 数据库配置

use crate::error::{Result, TakeoutError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 数据库URL
    pub url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/sky_takeout.db".to_string(),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// 确保数据库路径存在（仅对SQLite文件数据库）
    pub fn ensure_database_path(&self) -> Result<()> {
        if self.is_sqlite() && !self.is_memory_database() {
            let path_str = self.url.strip_prefix("sqlite://").unwrap_or(&self.url);
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            let db_path = Path::new(path_str);

            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        TakeoutError::config_with_source(
                            format!("无法创建数据库目录: {}", parent.display()),
                            e,
                        )
                    })?;
                    info!(dir = %parent.display(), "Created database directory");
                }
            }

            // sqlx 默认不创建缺失的数据库文件
            if !db_path.exists() {
                std::fs::File::create(db_path).map_err(|e| {
                    TakeoutError::config_with_source(
                        format!("无法创建数据库文件: {}", db_path.display()),
                        e,
                    )
                })?;
                info!(path = %db_path.display(), "Created database file");
            }
        }

        Ok(())
    }

    /// 检查是否为内存数据库
    #[must_use]
    pub fn is_memory_database(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// 检查是否为SQLite数据库
    #[must_use]
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_database_detection() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(config.is_sqlite());
        assert!(config.is_memory_database());
        assert!(config.ensure_database_path().is_ok());
    }

    #[test]
    fn test_ensure_database_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("takeout.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", db_path.display()),
            ..DatabaseConfig::default()
        };

        config.ensure_database_path().unwrap();
        assert!(db_path.parent().unwrap().exists());
        assert!(db_path.exists());
    }
}
