//! # HTTP 中间件

pub mod user_context;

pub use user_context::{USER_ID_HEADER, UserContext, user_context_middleware};
