//! HTTP 层集成测试：用 tower 的 oneshot 驱动完整路由

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use product_api::app::products::handler::{router, AppState};
use product_api::app::products::service::ProductService;
use product_api::app::products::store::ProductStore;
use product_api::infrastructure::config::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

const TEST_API_KEY: &str = "test-api-key";

fn test_app() -> Router {
    let config = AppConfig {
        port: 0,
        api_key: TEST_API_KEY.to_string(),
    };
    let store = Arc::new(Mutex::new(ProductStore::with_seed_data()));

    router(AppState {
        product_service: ProductService::new(store),
        config,
    })
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, uri: &str, api_key: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid_payload() -> Value {
    json!({
        "name": "Webcam HD",
        "description": "1080p webcam with microphone",
        "price": 59.99,
        "category": "Electronics"
    })
}

#[tokio::test]
async fn test_list_products_envelope() {
    let app = test_app();
    let response = app.oneshot(get_request("/api/products")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
    assert_eq!(body["pagination"]["currentPage"], json!(1));
    assert_eq!(body["pagination"]["totalPages"], json!(1));
    assert_eq!(body["pagination"]["totalItems"], json!(6));
    assert_eq!(body["pagination"]["itemsPerPage"], json!(10));
    assert_eq!(body["pagination"]["hasNext"], json!(false));
    assert_eq!(body["pagination"]["hasPrevious"], json!(false));
}

#[tokio::test]
async fn test_list_products_category_and_paging() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/api/products?category=electronics&limit=2&page=2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["totalItems"], json!(3));
    assert_eq!(body["pagination"]["totalPages"], json!(2));
    assert_eq!(body["pagination"]["hasNext"], json!(false));
    assert_eq!(body["pagination"]["hasPrevious"], json!(true));
}

#[tokio::test]
async fn test_list_rejects_non_numeric_pagination() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/api/products?page=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Validation Error"));
    assert_eq!(body["message"], json!("Page and limit must be positive integers"));
}

#[tokio::test]
async fn test_get_unknown_product_is_not_found() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/api/products/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Not Found"));
    assert_eq!(body["message"], json!("Product with ID does-not-exist not found"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_search_requires_q() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/api/products/search"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Validation Error"));
    assert_eq!(body["message"], json!("Search term (q) is required"));
}

#[tokio::test]
async fn test_search_matches_case_insensitively() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/api/products/search?q=LAPTOP"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], json!("Laptop Pro 15"));
    // 搜索接口的分页元数据不带 hasNext/hasPrevious
    assert!(body["pagination"].get("hasNext").is_none());
    assert!(body["pagination"].get("hasPrevious").is_none());
    assert_eq!(body["pagination"]["totalItems"], json!(1));
}

#[tokio::test]
async fn test_stats_endpoint() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/api/products/stats"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["totalProducts"], json!(6));
    assert_eq!(data["inStockCount"], json!(5));
    assert_eq!(data["outOfStockCount"], json!(1));
    assert_eq!(data["categoryBreakdown"]["Electronics"], json!(3));
    assert_eq!(data["priceRange"]["min"], json!(12.99));
    assert_eq!(data["priceRange"]["max"], json!(1299.99));
}

#[tokio::test]
async fn test_create_requires_api_key() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/products",
            None,
            &valid_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Authentication Error"));
    assert_eq!(
        body["message"],
        json!("API key is required. Provide it in the x-api-key header.")
    );
}

#[tokio::test]
async fn test_create_rejects_wrong_api_key() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/products",
            Some("wrong-key"),
            &valid_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Invalid API key provided."));
}

#[tokio::test]
async fn test_create_product_success() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/products",
            Some(TEST_API_KEY),
            &valid_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Product created successfully"));
    assert_eq!(body["data"]["name"], json!("Webcam HD"));
    // 未传 inStock 时默认有货
    assert_eq!(body["data"]["inStock"], json!(true));
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_accumulates_validation_errors() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/products",
            Some(TEST_API_KEY),
            &json!({ "name": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Validation Error"));
    assert_eq!(
        body["message"],
        json!(
            "Name is required and must be a non-empty string, \
             Description is required and must be a non-empty string, \
             Price is required and must be a non-negative number, \
             Category is required and must be a non-empty string"
        )
    );
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-api-key", TEST_API_KEY)
        .body(Body::from("{not valid json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("JSON Parse Error"));
}

#[tokio::test]
async fn test_update_full_replace_preserves_omitted_in_stock() {
    let app = test_app();

    let mut create_body = valid_payload();
    create_body["inStock"] = json!(false);
    let created = body_json(
        app.clone()
            .oneshot(json_request(
                Method::POST,
                "/api/products",
                Some(TEST_API_KEY),
                &create_body,
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/products/{}", id),
            Some(TEST_API_KEY),
            &json!({
                "name": "Webcam HD Pro",
                "description": "4K webcam with microphone",
                "price": 89.99,
                "category": "Electronics"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Product updated successfully"));
    assert_eq!(body["data"]["id"], json!(id));
    assert_eq!(body["data"]["name"], json!("Webcam HD Pro"));
    // 请求没带 inStock，保留创建时的 false
    assert_eq!(body["data"]["inStock"], json!(false));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/products/missing-id",
            Some(TEST_API_KEY),
            &valid_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Product with ID missing-id not found"));
}

#[tokio::test]
async fn test_delete_product_returns_removed_record() {
    let app = test_app();

    let created = body_json(
        app.clone()
            .oneshot(json_request(
                Method::POST,
                "/api/products",
                Some(TEST_API_KEY),
                &valid_payload(),
            ))
            .await
            .unwrap(),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::DELETE,
            &format!("/api/products/{}", id),
            Some(TEST_API_KEY),
            &json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Product deleted successfully"));
    assert_eq!(body["data"]["id"], json!(id));

    // 删除后再取同一 ID 应当 404
    let response = app
        .oneshot(get_request(&format!("/api/products/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_api_key() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/products/anything")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unmatched_route_returns_envelope_404() {
    let app = test_app();
    let response = app.oneshot(get_request("/api/unknown")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Not Found"));
    assert_eq!(body["message"], json!("Route not found"));
}

#[tokio::test]
async fn test_health_check_reports_product_count() {
    let app = test_app();
    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["products_count"], json!(6));
}

#[tokio::test]
async fn test_root_returns_api_info() {
    let app = test_app();
    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], json!("Product API"));
    assert!(body["endpoints"].is_object());
}
