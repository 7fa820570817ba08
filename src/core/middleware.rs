//! 核心中间件模块

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;

use crate::core::error::AppError;
use crate::infrastructure::config::AppConfig;

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "{} {} - {} - {}ms - User-Agent: {:?}",
        method,
        uri,
        status,
        duration.as_millis(),
        user_agent
    );

    response
}

/// API 密钥认证中间件
///
/// 只拦截写操作 (POST/PUT/DELETE)，读操作直接放行。
/// 密钥从 x-api-key 请求头读取，与配置中的密钥做精确比较。
pub async fn api_key_auth(
    State(config): State<AppConfig>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = req.method();
    if method == Method::POST || method == Method::PUT || method == Method::DELETE {
        let api_key = req
            .headers()
            .get("x-api-key")
            .and_then(|value| value.to_str().ok());

        match api_key {
            None => {
                return Err(AppError::Authentication(
                    "API key is required. Provide it in the x-api-key header.".to_string(),
                ))
            }
            Some(key) if key != config.api_key => {
                return Err(AppError::Authentication(
                    "Invalid API key provided.".to_string(),
                ))
            }
            Some(_) => {}
        }
    }

    Ok(next.run(req).await)
}
