//! # 错误类型定义

use axum::http::StatusCode;
use thiserror::Error;

use super::ErrorCategory;

/// 应用主要错误类型
#[derive(Debug, Error)]
pub enum TakeoutError {
    /// 输入格式错误或越界，例如 begin > end、份数 < 1
    #[error("参数校验失败: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// 引用的菜品、套餐或订单不存在
    #[error("资源未找到: {resource_type} {identifier}")]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    /// 违反业务规则，例如启售含停售菜品的套餐
    #[error("业务规则不满足: {message}")]
    PreconditionFailed { message: String },

    /// 持久层错误，不在本地重试
    #[error("数据库错误: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 配置相关错误
    #[error("配置错误: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 序列化/反序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// IO相关错误
    #[error("IO错误: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// 系统内部错误
    #[error("内部错误: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 附加了上下文信息的错误
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<TakeoutError>,
    },
}

impl TakeoutError {
    /// 剥离上下文包装，返回最内层错误
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// 将错误转换为HTTP状态码和错误代码
    #[must_use]
    pub fn to_http_response_parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
            Self::PreconditionFailed { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "PRECONDITION_FAILED")
            }
            Self::Database { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            Self::Config { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Self::Serialization { .. } => (StatusCode::BAD_REQUEST, "SERIALIZATION_ERROR"),
            Self::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Context { source, .. } => source.to_http_response_parts(),
        }
    }

    /// 错误归属：调用方还是服务端
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        if self.to_http_response_parts().0.is_server_error() {
            ErrorCategory::Server
        } else {
            ErrorCategory::Client
        }
    }

    /// 创建参数校验错误
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// 创建指明字段的参数校验错误
    pub fn validation_field<T: Into<String>, F: Into<String>>(message: T, field: F) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// 创建资源未找到错误
    pub fn not_found<T: Into<String>, I: ToString>(resource_type: T, identifier: I) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.to_string(),
        }
    }

    /// 创建业务规则错误
    pub fn precondition<T: Into<String>>(message: T) -> Self {
        Self::PreconditionFailed {
            message: message.into(),
        }
    }

    /// 创建数据库错误
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的数据库错误
    pub fn database_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建配置错误
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的配置错误
    pub fn config_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建内部错误
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }
}

// 自动转换常见错误类型
impl From<std::io::Error> for TakeoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: "文件操作失败".to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for TakeoutError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML解析失败", err)
    }
}

impl From<serde_json::Error> for TakeoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON处理失败".to_string(),
            source: err.into(),
        }
    }
}

impl From<sea_orm::error::DbErr> for TakeoutError {
    fn from(err: sea_orm::error::DbErr) -> Self {
        Self::database_with_source("数据库操作失败", err)
    }
}
