//! # API 响应结构
//!
//! 统一的 `{code, msg, data}` 响应信封：`code = 1` 表示成功，`code = 0` 表示失败。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{ErrorCategory, TakeoutError};

pub const CODE_SUCCESS: i32 = 1;
pub const CODE_FAILURE: i32 = 0;

/// # 响应信封
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    pub msg: Option<String>,
    pub data: Option<T>,
}

/// # API响应枚举
///
/// 统一所有API出口，方便转换为 `axum::response::Response`
#[derive(Debug)]
pub enum ApiResponse<T: Serialize> {
    Success(T),
    SuccessWithoutData,
    Error(StatusCode, String),
    AppError(TakeoutError),
}

fn envelope<T: Serialize>(status: StatusCode, body: Envelope<T>) -> Response {
    (status, Json(body)).into_response()
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Success(data) => envelope(
                StatusCode::OK,
                Envelope {
                    code: CODE_SUCCESS,
                    msg: None,
                    data: Some(data),
                },
            ),
            Self::SuccessWithoutData => envelope(
                StatusCode::OK,
                Envelope::<()> {
                    code: CODE_SUCCESS,
                    msg: None,
                    data: None,
                },
            ),
            Self::Error(status, message) => envelope(
                status,
                Envelope::<()> {
                    code: CODE_FAILURE,
                    msg: Some(message),
                    data: None,
                },
            ),
            Self::AppError(error) => {
                let (status, code) = error.to_http_response_parts();
                match error.category() {
                    ErrorCategory::Server => error!(code, error = ?error, "Request failed"),
                    ErrorCategory::Client => warn!(code, %error, "Request rejected"),
                }

                envelope(
                    status,
                    Envelope::<()> {
                        code: CODE_FAILURE,
                        msg: Some(error.to_string()),
                        data: None,
                    },
                )
            }
        }
    }
}

/// # 便捷函数：成功响应
pub fn success<T: Serialize>(data: T) -> Response {
    ApiResponse::Success(data).into_response()
}

/// # 便捷函数：无数据体的成功响应
pub fn success_without_data() -> Response {
    ApiResponse::<()>::SuccessWithoutData.into_response()
}

/// # 便捷函数：HTTP错误响应
pub fn error(status: StatusCode, message: &str) -> Response {
    ApiResponse::<()>::Error(status, message.to_string()).into_response()
}

/// # 便捷函数：应用错误响应
pub fn app_error(error: TakeoutError) -> Response {
    ApiResponse::<()>::AppError(error).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_keeps_mapped_status() {
        let response = app_error(TakeoutError::not_found("bundle", 9));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app_error(TakeoutError::precondition("套餐内包含停售菜品"));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn success_is_ok() {
        assert_eq!(success(vec![1, 2]).status(), StatusCode::OK);
        assert_eq!(success_without_data().status(), StatusCode::OK);
    }
}
