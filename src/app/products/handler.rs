//! 产品路由与处理器
//!
//! 把 HTTP 方法+路径映射到业务服务，并做请求和响应的整形。

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::model::{ListQuery, Product, ProductStats, SearchQuery};
use super::service::ProductService;
use crate::core::error::AppError;
use crate::core::middleware::{api_key_auth, request_logging_middleware};
use crate::core::response::ApiResponse;
use crate::infrastructure::config::AppConfig;

/// 应用状态，注入到各个处理器
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    pub config: AppConfig,
}

/// 组装完整路由，含中间件层
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health_check))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/search", get(search_products))
        .route("/api/products/stats", get(product_stats))
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            api_key_auth,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 严格解析分页参数：缺省用默认值，给了但不是正整数则拒绝
fn parse_pagination(page: Option<&str>, limit: Option<&str>) -> Result<(u32, u32), AppError> {
    let parse = |value: Option<&str>, default: u32| -> Result<u32, AppError> {
        match value {
            None => Ok(default),
            Some(text) => match text.parse::<u32>() {
                Ok(number) if number >= 1 => Ok(number),
                _ => Err(AppError::Validation(
                    "Page and limit must be positive integers".to_string(),
                )),
            },
        }
    };

    Ok((parse(page, 1)?, parse(limit, 10)?))
}

/// API 信息
async fn api_info() -> Json<Value> {
    Json(serde_json::json!({
        "name": "Product API",
        "version": "0.1.0",
        "endpoints": {
            "GET /api/products": "产品列表，支持 category、page、limit 查询参数",
            "GET /api/products/:id": "获取单个产品",
            "GET /api/products/search": "按名称或描述搜索，q 必填",
            "GET /api/products/stats": "聚合统计",
            "POST /api/products": "创建产品，需要 x-api-key",
            "PUT /api/products/:id": "全量更新产品，需要 x-api-key",
            "DELETE /api/products/:id": "删除产品，需要 x-api-key"
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "products_count": state.product_service.count()
    }))
}

/// 产品列表
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, AppError> {
    let (page, limit) = parse_pagination(query.page.as_deref(), query.limit.as_deref())?;
    let (products, pagination) =
        state
            .product_service
            .list(query.category.as_deref(), page, limit)?;

    Ok(Json(ApiResponse::with_pagination(products, pagination)))
}

/// 获取单个产品
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let product = state.product_service.get(&id)?;
    Ok(Json(ApiResponse::success(product)))
}

/// 搜索产品
async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, AppError> {
    let (page, limit) = parse_pagination(query.page.as_deref(), query.limit.as_deref())?;
    let (products, pagination) = state
        .product_service
        .search(query.q.as_deref(), page, limit)?;

    Ok(Json(ApiResponse::with_pagination(products, pagination)))
}

/// 聚合统计
async fn product_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProductStats>>, AppError> {
    let stats = state.product_service.stats()?;
    Ok(Json(ApiResponse::success(stats)))
}

/// 创建产品
async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), AppError> {
    let Json(payload) = payload
        .map_err(|_| AppError::JsonParse("Invalid JSON format in request body".to_string()))?;

    let product = state.product_service.create(&payload)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            product,
            "Product created successfully",
        )),
    ))
}

/// 全量更新产品
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let Json(payload) = payload
        .map_err(|_| AppError::JsonParse("Invalid JSON format in request body".to_string()))?;

    let product = state.product_service.update(&id, &payload)?;

    Ok(Json(ApiResponse::with_message(
        product,
        "Product updated successfully",
    )))
}

/// 删除产品
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>, AppError> {
    let product = state.product_service.delete(&id)?;

    Ok(Json(ApiResponse::with_message(
        product,
        "Product deleted successfully",
    )))
}

/// 未匹配路由统一返回 404 封装
async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
