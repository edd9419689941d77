//! # API 统一错误处理
//!
//! 将下层各 crate 的错误类型统一映射到 HTTP 状态码与 `{ "error": ... }` 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use flowtrack_core::analytics::error::AnalyticsError;
use flowtrack_core::report::error::ReportError;
use flowtrack_core::store::error::StoreError;

use crate::types::ApiErrorResponse;

/// 必填字段缺失
pub const MISSING_FIELDS: &str = "Missing required fields";
/// 查询区间缺失
pub const MISSING_DATES: &str = "Start and end dates are required";
/// 查询区间无法解析
pub const INVALID_DATE: &str = "Invalid date format. Please use YYYY-MM-DD format.";
/// 流水时间无法解析
pub const INVALID_DATETIME: &str = "Invalid datetime format";
/// 数量或金额为负
pub const NEGATIVE_VALUES: &str = "Quantity and values must be non-negative";

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求参数错误 (400)
    #[error("{0}")]
    BadRequest(String),

    /// 下层存储或渲染错误 (500)
    #[error("{0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                // 内部工具，错误信息原样透传给调用方
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ApiErrorResponse::from_msg(message))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let resp = ApiError::BadRequest(MISSING_FIELDS.to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::from(StoreError::Database("disk full".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = ApiError::from(AnalyticsError::Overflow("total amount")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
