//! 核心错误处理模块
//!
//! 所有领域错误在产生处返回，统一在此转换为
//! HTTP 状态码和 JSON 错误封装。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 应用错误类型
#[derive(Debug)]
pub enum AppError {
    /// 请求数据校验失败 (400)
    Validation(String),
    /// API 密钥缺失或错误 (401)
    Authentication(String),
    /// 资源或路由不存在 (404)
    NotFound(String),
    /// 请求体不是合法 JSON (400)
    JsonParse(String),
    /// 未预期的内部错误 (500)
    Internal(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_kind, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Validation Error", msg),
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "Authentication Error", msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
            AppError::JsonParse(msg) => (StatusCode::BAD_REQUEST, "JSON Parse Error", msg),
            AppError::Internal(msg) => {
                // 完整细节只记录在服务端，客户端只收到通用提示
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error_kind.to_string(),
            message,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(body)).into_response()
    }
}
