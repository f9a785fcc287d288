//! # 管理API模块
//!
//! 业务服务层与其上的 HTTP 接口

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod services;

pub use routes::create_routes;
pub use server::{AppState, ManagementServer};
