//! 核心响应处理模块

use serde::Serialize;

/// 统一成功响应结构 `{success, data, ...extra}`
///
/// extra 部分按接口不同是 message（写操作）或 pagination（列表/搜索）。
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// 分页元数据
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: usize,
    pub items_per_page: u32,
    /// 列表接口携带，搜索接口省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_previous: Option<bool>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            pagination: None,
        }
    }

    pub fn with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
            pagination: None,
        }
    }

    pub fn with_pagination(data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            message: None,
            pagination: Some(pagination),
        }
    }
}
