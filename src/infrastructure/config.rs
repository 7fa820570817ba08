//! 配置基础设施

use std::env;

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP 服务端口
    pub port: u16,
    /// 写操作使用的 API 密钥
    pub api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            api_key: "dev-api-key-12345".to_string(),
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置，未设置或无法解析时使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.port);

        let api_key = env::var("API_KEY").unwrap_or(defaults.api_key);

        Self { port, api_key }
    }
}
