//! # Sky Takeout Core Library
//!
//! 外卖点餐平台业务核心：套餐管理、购物车与运营报表

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod management;
pub mod testing;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Result, TakeoutError};
