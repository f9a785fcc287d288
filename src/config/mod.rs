//! # 配置管理模块
//!
//! 处理应用配置加载与验证

mod app_config;
mod database;

pub use app_config::{AppConfig, PaginationConfig, ReportConfig, ServerConfig};
pub use database::DatabaseConfig;

use crate::error::{Result, TakeoutError};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 根据 `RUST_ENV` 推导默认配置文件路径
#[must_use]
pub fn default_config_path() -> PathBuf {
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    PathBuf::from(format!("config/config.{env}.toml"))
}

/// 加载配置文件
///
/// 未指定路径时使用 `config/config.{RUST_ENV}.toml`；文件不存在时回退到默认配置。
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config_file = path.map_or_else(default_config_path, Path::to_path_buf);

    let config = if config_file.exists() {
        let config_content = std::fs::read_to_string(&config_file).map_err(|e| {
            TakeoutError::config_with_source(
                format!("读取配置文件失败: {}", config_file.display()),
                e,
            )
        })?;
        info!(path = %config_file.display(), "Loaded configuration file");
        parse_config(&config_content)?
    } else {
        warn!(
            path = %config_file.display(),
            "Configuration file not found, falling back to defaults"
        );
        AppConfig::default()
    };

    config.validate()?;
    Ok(config)
}

/// 解析 TOML 配置内容，缺省的段落使用默认值
pub fn parse_config(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = parse_config(
            r#"
            [report]
            timezone = "UTC"
            "#,
        )
        .unwrap();

        assert_eq!(config.report.timezone, "UTC");
        assert_eq!(config.report.max_range_days, 366);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pagination.max_page_size, 100);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_config("server = = 1").unwrap_err();
        assert!(matches!(err, TakeoutError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/takeout.toml"))).unwrap();
        assert_eq!(config.report.timezone, "Asia/Shanghai");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ntimezone = \"Mars/Olympus\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, TakeoutError::Config { .. }));
    }
}
