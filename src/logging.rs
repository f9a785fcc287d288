//! # 日志配置模块
//!
//! 基于 `tracing-subscriber` 的日志初始化，默认屏蔽逐条 SQL 日志

use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 未设置 `RUST_LOG` 时使用的过滤规则
#[must_use]
pub fn default_filter(level: &str) -> String {
    format!("{level},sky_takeout=debug,sqlx::query=off,sea_orm=warn")
}

/// 判断当前环境是否开启了 SQL 语句日志
fn sql_logging_enabled(rust_log: Option<&str>) -> bool {
    rust_log.is_some_and(|v| v.contains("sqlx::query=info") || v.contains("sqlx::query=debug"))
}

/// 初始化日志系统
///
/// `RUST_LOG` 优先于 `level`；重复初始化（例如测试中）会被忽略。
pub fn init_logging(level: Option<&str>) {
    let level = level.unwrap_or("info");
    let rust_log = env::var("RUST_LOG").ok();
    let log_filter = rust_log.clone().unwrap_or_else(|| default_filter(level));

    let initialized = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter)))
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .is_ok();

    if !initialized {
        return;
    }

    if sql_logging_enabled(rust_log.as_deref()) {
        tracing::info!("SQL query logging enabled");
    } else {
        tracing::info!("SQL query logging disabled");
    }
}
