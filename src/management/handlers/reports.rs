//! 运营报表接口

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use super::extract::query_params;
use crate::management::response;
use crate::management::server::AppState;
use crate::management::services::ReportQuery;

pub async fn turnover_statistics(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match query_params(query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.reports.turnover_report(query.begin, query.end).await {
        Ok(report) => response::success(report.to_view()),
        Err(error) => response::app_error(error),
    }
}

pub async fn user_statistics(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match query_params(query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.reports.user_report(query.begin, query.end).await {
        Ok(report) => response::success(report.to_view()),
        Err(error) => response::app_error(error),
    }
}

pub async fn orders_statistics(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> axum::response::Response {
    let query = match query_params(query) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.reports.order_report(query.begin, query.end).await {
        Ok(report) => response::success(report.to_view()),
        Err(error) => response::app_error(error),
    }
}
