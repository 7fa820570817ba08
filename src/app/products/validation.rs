//! 产品入参校验
//!
//! 创建和更新共用同一套校验。所有违规一次性收集，按
//! name、description、price、category、inStock 的固定顺序
//! 拼成一条错误消息，而不是遇到第一个就返回。

use crate::core::error::AppError;
use serde_json::Value;

/// 字段须为字符串且 trim 后非空
fn is_non_empty_string(payload: &Value, field: &str) -> bool {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false)
}

/// 校验产品请求体，通过时不产生任何值
pub fn validate_product_payload(payload: &Value) -> Result<(), AppError> {
    let mut violations: Vec<&str> = Vec::new();

    if !is_non_empty_string(payload, "name") {
        violations.push("Name is required and must be a non-empty string");
    }

    if !is_non_empty_string(payload, "description") {
        violations.push("Description is required and must be a non-empty string");
    }

    match payload.get("price").and_then(Value::as_f64) {
        Some(price) if price >= 0.0 => {}
        _ => violations.push("Price is required and must be a non-negative number"),
    }

    if !is_non_empty_string(payload, "category") {
        violations.push("Category is required and must be a non-empty string");
    }

    // inStock 允许缺省，给了就必须是布尔值
    if let Some(in_stock) = payload.get("inStock") {
        if !in_stock.is_boolean() {
            violations.push("inStock must be a boolean");
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations.join(", ")))
    }
}
