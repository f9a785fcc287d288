//! # HTTP 处理器
//!
//! 薄包装：解析请求参数，调用服务层，包装统一响应。

pub mod bundles;
pub mod cart;
pub mod extract;
pub mod reports;
