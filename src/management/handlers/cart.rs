//! 购物车接口，用户由 `UserContext` 中间件注入

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};

use super::extract::json_body;
use crate::management::middleware::UserContext;
use crate::management::response;
use crate::management::server::AppState;
use crate::management::services::CartCandidate;

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserContext>>,
    candidate: Result<Json<CartCandidate>, JsonRejection>,
) -> axum::response::Response {
    let candidate = match json_body(candidate) {
        Ok(candidate) => candidate,
        Err(response) => return response,
    };

    match state.cart.add_line(user.user_id, &candidate).await {
        Ok(line) => response::success(line),
        Err(error) => response::app_error(error),
    }
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserContext>>,
    candidate: Result<Json<CartCandidate>, JsonRejection>,
) -> axum::response::Response {
    let candidate = match json_body(candidate) {
        Ok(candidate) => candidate,
        Err(response) => return response,
    };

    match state.cart.remove_one(user.user_id, &candidate).await {
        Ok(()) => response::success_without_data(),
        Err(error) => response::app_error(error),
    }
}

pub async fn list_cart(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserContext>>,
) -> axum::response::Response {
    match state.cart.list(user.user_id).await {
        Ok(lines) => response::success(lines),
        Err(error) => response::app_error(error),
    }
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<UserContext>>,
) -> axum::response::Response {
    match state.cart.clear(user.user_id).await {
        Ok(_) => response::success_without_data(),
        Err(error) => response::app_error(error),
    }
}
