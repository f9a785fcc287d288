//! 套餐管理接口

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::extract::{json_body, path_param, query_params};
use crate::error::{self, TakeoutError};
use crate::management::response;
use crate::management::server::AppState;
use crate::management::services::{BundleInput, BundleQuery, UpdateBundleRequest, parse_sale_status};

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct IdsQuery {
    pub ids: String,
}

/// 解析逗号分隔的 id 列表，例如 `1,2,3`
pub fn parse_id_list(raw: &str) -> error::Result<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| TakeoutError::validation_field(format!("无效的套餐 id: {part}"), "ids"))
        })
        .collect()
}

pub async fn create_bundle(
    State(state): State<AppState>,
    input: Result<Json<BundleInput>, JsonRejection>,
) -> axum::response::Response {
    let input = match json_body(input) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match state.bundles.create(&input).await {
        Ok(id) => response::success(id),
        Err(error) => response::app_error(error),
    }
}

pub async fn update_bundle(
    State(state): State<AppState>,
    request: Result<Json<UpdateBundleRequest>, JsonRejection>,
) -> axum::response::Response {
    let request = match json_body(request) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.bundles.update(request.id, &request.bundle).await {
        Ok(()) => response::success_without_data(),
        Err(error) => response::app_error(error),
    }
}

pub async fn page_bundles(
    State(state): State<AppState>,
    query: Result<Query<BundleQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match query_params(query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.bundles.page(&query).await {
        Ok(page) => response::success(page),
        Err(error) => response::app_error(error),
    }
}

pub async fn get_bundle(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> axum::response::Response {
    let id = match path_param(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.bundles.get_by_id(id).await {
        Ok(bundle) => response::success(bundle),
        Err(error) => response::app_error(error),
    }
}

/// 启售 / 停售
pub async fn set_bundle_status(
    State(state): State<AppState>,
    status: Result<Path<i32>, PathRejection>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> axum::response::Response {
    let (status, query) = match (path_param(status), query_params(query)) {
        (Ok(status), Ok(query)) => (status, query),
        (Err(response), _) | (_, Err(response)) => return response,
    };

    let result = match parse_sale_status(status) {
        Ok(status) => state.bundles.set_status(query.id, status).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(()) => response::success_without_data(),
        Err(error) => response::app_error(error),
    }
}

pub async fn delete_bundles(
    State(state): State<AppState>,
    query: Result<Query<IdsQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match query_params(query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let ids = match parse_id_list(&query.ids) {
        Ok(ids) => ids,
        Err(error) => return response::app_error(error),
    };

    match state.bundles.delete_batch(&ids).await {
        Ok(_) => response::success_without_data(),
        Err(error) => response::app_error(error),
    }
}
