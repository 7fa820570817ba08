//! 产品业务服务
//!
//! 查询部分是对存储快照的纯函数运算；写操作在一次锁持有
//! 期间同步完成，锁内没有任何 await 点，请求之间不会交错。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use uuid::Uuid;

use super::model::{PriceRange, Product, ProductStats};
use super::store::ProductStore;
use super::validation::validate_product_payload;
use crate::core::error::AppError;
use crate::core::response::Pagination;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<Mutex<ProductStore>>,
}

/// 对过滤结果取 `[(page-1)*limit, (page-1)*limit+limit)` 切片并计算元数据
///
/// 列表带 hasNext/hasPrevious，搜索不带。
fn paginate(items: Vec<Product>, page: u32, limit: u32, with_nav: bool) -> (Vec<Product>, Pagination) {
    let total_items = items.len();
    let start = (page as usize - 1) * limit as usize;
    let end = start + limit as usize;
    let total_pages = (total_items + limit as usize - 1) / limit as usize;

    let data: Vec<Product> = items.into_iter().skip(start).take(limit as usize).collect();

    let pagination = Pagination {
        current_page: page,
        total_pages: total_pages as u32,
        total_items,
        items_per_page: limit,
        has_next: with_nav.then_some(end < total_items),
        has_previous: with_nav.then_some(page > 1),
    };

    (data, pagination)
}

/// 校验通过后取文本字段并 trim
fn text_field(payload: &Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// 校验通过后取数值字段，统一转为 f64
fn number_field(payload: &Value, field: &str) -> f64 {
    payload.get(field).and_then(Value::as_f64).unwrap_or_default()
}

impl ProductService {
    pub fn new(store: Arc<Mutex<ProductStore>>) -> Self {
        Self { store }
    }

    /// 产品列表：可选 category 子串过滤（不区分大小写）+ 分页
    pub fn list(
        &self,
        category: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Product>, Pagination), AppError> {
        let products = self.store.lock().unwrap().all();

        let filtered: Vec<Product> = match category {
            Some(needle) => {
                let needle = needle.to_lowercase();
                products
                    .into_iter()
                    .filter(|product| product.category.to_lowercase().contains(&needle))
                    .collect()
            }
            None => products,
        };

        Ok(paginate(filtered, page, limit, true))
    }

    /// 按 ID 获取单个产品
    pub fn get(&self, id: &str) -> Result<Product, AppError> {
        self.store
            .lock()
            .unwrap()
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))
    }

    /// 按名称或描述子串搜索（不区分大小写），q 必填
    pub fn search(
        &self,
        q: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Product>, Pagination), AppError> {
        let term = match q {
            Some(term) if !term.is_empty() => term.to_lowercase(),
            _ => {
                return Err(AppError::Validation(
                    "Search term (q) is required".to_string(),
                ))
            }
        };

        let products = self.store.lock().unwrap().all();
        let matched: Vec<Product> = products
            .into_iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term)
            })
            .collect();

        Ok(paginate(matched, page, limit, false))
    }

    /// 聚合统计：总数、库存分布、分类分布、均价和价格区间
    pub fn stats(&self) -> Result<ProductStats, AppError> {
        let products = self.store.lock().unwrap().all();

        let total_products = products.len();
        let in_stock_count = products.iter().filter(|product| product.in_stock).count();

        let mut category_breakdown: HashMap<String, usize> = HashMap::new();
        for product in &products {
            *category_breakdown.entry(product.category.clone()).or_insert(0) += 1;
        }

        // 空存储时均价和价格区间都归零，不返回 NaN
        let (average_price, price_range) = if products.is_empty() {
            (0.0, PriceRange { min: 0.0, max: 0.0 })
        } else {
            let sum: f64 = products.iter().map(|product| product.price).sum();
            // 均价保留两位小数，放大后四舍五入
            let average = (sum / total_products as f64 * 100.0).round() / 100.0;
            let min = products
                .iter()
                .map(|product| product.price)
                .fold(f64::INFINITY, f64::min);
            let max = products
                .iter()
                .map(|product| product.price)
                .fold(f64::NEG_INFINITY, f64::max);
            (average, PriceRange { min, max })
        };

        Ok(ProductStats {
            total_products,
            in_stock_count,
            out_of_stock_count: total_products - in_stock_count,
            category_breakdown,
            average_price,
            price_range,
        })
    }

    /// 创建产品：校验、生成 ID、整理字段后追加到存储
    pub fn create(&self, payload: &Value) -> Result<Product, AppError> {
        validate_product_payload(payload)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: text_field(payload, "name"),
            description: text_field(payload, "description"),
            price: number_field(payload, "price"),
            category: text_field(payload, "category"),
            // 缺省时默认有货
            in_stock: payload.get("inStock").and_then(Value::as_bool).unwrap_or(true),
        };

        self.store.lock().unwrap().append(product.clone());
        Ok(product)
    }

    /// 全量更新：id 不变；请求未带 inStock 时保留原值
    pub fn update(&self, id: &str, payload: &Value) -> Result<Product, AppError> {
        validate_product_payload(payload)?;

        let mut store = self.store.lock().unwrap();
        let product = store
            .find_by_id_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;

        product.name = text_field(payload, "name");
        product.description = text_field(payload, "description");
        product.price = number_field(payload, "price");
        product.category = text_field(payload, "category");
        if let Some(in_stock) = payload.get("inStock").and_then(Value::as_bool) {
            product.in_stock = in_stock;
        }

        Ok(product.clone())
    }

    /// 删除产品并返回被删除的记录
    pub fn delete(&self, id: &str) -> Result<Product, AppError> {
        let mut store = self.store.lock().unwrap();
        let index = store
            .find_index_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;

        Ok(store.remove_at(index))
    }

    /// 当前产品数量
    pub fn count(&self) -> usize {
        self.store.lock().unwrap().len()
    }
}
