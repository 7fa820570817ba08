//! 产品内存存储
//!
//! 有序可变集合，按插入顺序保存产品。没有任何字段索引，
//! 所有查找都是线性扫描；进程退出后数据全部丢失。

use super::model::Product;
use uuid::Uuid;

pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// 创建带启动种子数据的存储
    pub fn with_seed_data() -> Self {
        let seed = [
            (
                "Laptop Pro 15",
                "High performance laptop with 15 inch display",
                1299.99,
                "Electronics",
                true,
            ),
            (
                "Wireless Mouse",
                "Ergonomic wireless mouse with USB receiver",
                29.99,
                "Electronics",
                true,
            ),
            (
                "Mechanical Keyboard",
                "RGB mechanical keyboard with blue switches",
                89.99,
                "Electronics",
                true,
            ),
            (
                "Office Chair",
                "Adjustable office chair with lumbar support",
                199.99,
                "Furniture",
                true,
            ),
            (
                "Standing Desk",
                "Electric height adjustable standing desk",
                449.99,
                "Furniture",
                false,
            ),
            ("Coffee Mug", "Ceramic coffee mug, 350ml", 12.99, "Kitchen", true),
        ];

        let mut store = Self::new();
        for (name, description, price, category, in_stock) in seed {
            store.append(Product {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price,
                category: category.to_string(),
                in_stock,
            });
        }
        store
    }

    /// 追加到集合末尾
    pub fn append(&mut self, product: Product) {
        self.products.push(product);
    }

    /// 按 ID 精确查找
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// 按 ID 查找可变引用，更新操作原地改写字段
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|product| product.id == id)
    }

    /// 按 ID 查找所在位置
    pub fn find_index_by_id(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|product| product.id == id)
    }

    /// 按位置移除并返回该产品
    pub fn remove_at(&mut self, index: usize) -> Product {
        self.products.remove(index)
    }

    /// 返回只读快照，外部拿不到内部集合的可变引用
    pub fn all(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}
