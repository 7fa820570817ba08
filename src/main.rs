//! 产品管理 API 服务器入口

use std::sync::{Arc, Mutex};

use product_api::app::products::handler::{router, AppState};
use product_api::app::products::service::ProductService;
use product_api::app::products::store::ProductStore;
use product_api::infrastructure::config::AppConfig;
use product_api::infrastructure::logger::Logger;
use tokio::net::TcpListener;
use tracing::{info, Level};

#[tokio::main]
async fn main() {
    // 初始化日志
    Logger::init(Level::INFO);

    // 加载配置
    let config = AppConfig::from_env();

    // 创建带种子数据的产品存储，注入到服务中
    let store = Arc::new(Mutex::new(ProductStore::with_seed_data()));
    let state = AppState {
        product_service: ProductService::new(store),
        config: config.clone(),
    };

    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await.expect("无法绑定服务端口");

    info!("🚀 产品 API 服务器运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /                     - API 信息");
    info!("   GET    /health               - 健康检查");
    info!("   GET    /api/products         - 产品列表 (category/page/limit)");
    info!("   GET    /api/products/:id     - 获取单个产品");
    info!("   GET    /api/products/search  - 搜索产品 (q 必填)");
    info!("   GET    /api/products/stats   - 聚合统计");
    info!("   POST   /api/products         - 创建产品 (需要 x-api-key)");
    info!("   PUT    /api/products/:id     - 更新产品 (需要 x-api-key)");
    info!("   DELETE /api/products/:id     - 删除产品 (需要 x-api-key)");

    axum::serve(listener, app).await.expect("服务器启动失败");
}
