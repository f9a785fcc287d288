//! # 用户上下文中间件
//!
//! 从 `X-User-Id` 头解析当前用户并注入请求扩展。身份认证由上游网关负责。

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::sync::Arc;

use crate::management::response;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// 当前请求所属用户
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: i32,
}

/// 用户 id 必须是正整数
#[must_use]
pub fn parse_user_id(header: Option<&str>) -> Option<i32> {
    header
        .and_then(|raw| raw.trim().parse::<i32>().ok())
        .filter(|id| *id > 0)
}

pub async fn user_context_middleware(mut request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok());

    let Some(user_id) = parse_user_id(header) else {
        return response::error(StatusCode::UNAUTHORIZED, "缺少或无效的 X-User-Id 请求头");
    };

    request
        .extensions_mut()
        .insert(Arc::new(UserContext { user_id }));
    next.run(request).await
}
