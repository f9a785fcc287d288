//! # 路由配置
//!
//! 管理端（套餐、报表）与用户端（购物车）路由

use axum::routing::{delete, get, post};
use axum::{Router, middleware};

use crate::management::handlers::{bundles, cart, reports};
use crate::management::middleware::user_context_middleware;
use crate::management::server::AppState;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .nest("/admin/setmeal", bundle_routes())
        .nest("/admin/report", report_routes())
        .nest("/user/shoppingCart", cart_routes())
        .with_state(state)
}

/// 套餐管理路由
fn bundle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(bundles::create_bundle)
                .put(bundles::update_bundle)
                .delete(bundles::delete_bundles),
        )
        .route("/page", get(bundles::page_bundles))
        .route("/{id}", get(bundles::get_bundle))
        .route("/status/{status}", post(bundles::set_bundle_status))
}

/// 报表路由
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/turnoverStatistics", get(reports::turnover_statistics))
        .route("/userStatistics", get(reports::user_statistics))
        .route("/ordersStatistics", get(reports::orders_statistics))
}

/// 购物车路由，需要 `X-User-Id`
fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add_to_cart))
        .route("/sub", post(cart::remove_from_cart))
        .route("/list", get(cart::list_cart))
        .route("/clean", delete(cart::clear_cart))
        .route_layer(middleware::from_fn(user_context_middleware))
}
