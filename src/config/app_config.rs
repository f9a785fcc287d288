//! # 应用配置结构定义

use crate::error::{Result, TakeoutError};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// 应用主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 数据库配置
    pub database: super::DatabaseConfig,
    /// 报表配置
    pub report: ReportConfig,
    /// 分页配置
    pub pagination: PaginationConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// 监听地址字符串
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 报表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 划分自然日使用的时区（IANA 名称）
    pub timezone: String,
    /// 单次报表允许的最大天数
    pub max_range_days: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Shanghai".to_string(),
            max_range_days: 366,
        }
    }
}

impl ReportConfig {
    /// 解析时区名称
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            TakeoutError::config(format!("无效的报表时区: {}", self.timezone))
        })
    }
}

/// 分页配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// 未指定时的每页条数
    pub default_page_size: u64,
    /// 每页条数上限
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(TakeoutError::config("服务端口必须大于0"));
        }

        if self.database.url.is_empty() {
            return Err(TakeoutError::config("数据库URL不能为空"));
        }
        if self.database.max_connections == 0 {
            return Err(TakeoutError::config("数据库最大连接数必须大于0"));
        }

        self.report.tz()?;
        if self.report.max_range_days == 0 {
            return Err(TakeoutError::config("报表最大天数必须大于0"));
        }

        let pagination = &self.pagination;
        if pagination.default_page_size == 0 || pagination.max_page_size == 0 {
            return Err(TakeoutError::config("分页大小必须大于0"));
        }
        if pagination.default_page_size > pagination.max_page_size {
            return Err(TakeoutError::config(format!(
                "默认分页大小 {} 超过上限 {}",
                pagination.default_page_size, pagination.max_page_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.report.tz().unwrap(), chrono_tz::Asia::Shanghai);
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.database.url.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.report.timezone = "Nowhere/City".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.pagination.default_page_size = 500;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.pagination.max_page_size = 0;
        assert!(config.validate().is_err());
    }
}
