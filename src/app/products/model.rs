//! 产品数据模型

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 产品记录，本服务管理的唯一资源
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// 创建时生成，之后不可变
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// 产品列表查询参数
///
/// page/limit 以文本接收，由处理器做严格解析。
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// 产品搜索查询参数
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// 聚合统计结果
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    pub in_stock_count: usize,
    pub out_of_stock_count: usize,
    pub category_breakdown: HashMap<String, usize>,
    pub average_price: f64,
    pub price_range: PriceRange,
}

/// 全部产品的价格区间
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}
