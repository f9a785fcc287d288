//! 提取器失败统一转换为 `{code, msg, data}` 响应

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::response::Response;

use crate::management::response;

pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(body)| body)
        .map_err(|rejection| response::error(rejection.status(), &rejection.body_text()))
}

pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Response> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| response::error(rejection.status(), &rejection.body_text()))
}

pub fn path_param<T>(path: Result<Path<T>, PathRejection>) -> Result<T, Response> {
    path.map(|Path(path)| path)
        .map_err(|rejection| response::error(rejection.status(), &rejection.body_text()))
}
