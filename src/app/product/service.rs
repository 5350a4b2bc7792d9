//! 商品业务服务
//!
//! `ProductService` 持有进程内的商品集合，按插入顺序保存。克隆只复制句柄，
//! 所有克隆共享同一份数据；每个操作在整个读或读改写过程中持有锁。

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::model::{CreateProductRequest, ListProductsQuery, Product, UpdateProductRequest};
use crate::config::CatalogConfig;
use crate::core::{error::CoreError, response::Page};

pub const NOT_FOUND_MESSAGE: &str = "Product not found";

#[derive(Clone)]
pub struct ProductService {
    products: Arc<RwLock<Vec<Product>>>,
    default_page_size: usize,
}

impl ProductService {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            products: Arc::new(RwLock::new(Vec::new())),
            default_page_size: config.default_page_size,
        }
    }

    /// 按分类、名称关键字过滤后分页
    pub async fn list(&self, query: ListProductsQuery) -> Page<Product> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(self.default_page_size);

        let category = query.category.filter(|c| !c.is_empty());
        let search = query
            .search
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase());

        let products = self.products.read().await;
        let filtered: Vec<Product> = products
            .iter()
            .filter(|p| category.as_deref().map_or(true, |c| p.category == c))
            .filter(|p| {
                search
                    .as_deref()
                    .map_or(true, |s| p.name.to_lowercase().contains(s))
            })
            .cloned()
            .collect();

        debug!(
            matched = filtered.len(),
            total = products.len(),
            page,
            limit,
            "listing products"
        );

        Page::slice(&filtered, page, limit)
    }

    /// 每个分类的商品数量
    pub async fn stats(&self) -> BTreeMap<String, usize> {
        let products = self.products.read().await;
        let mut stats = BTreeMap::new();
        for product in products.iter() {
            *stats.entry(product.category.clone()).or_insert(0) += 1;
        }
        stats
    }

    pub async fn get(&self, id: &str) -> Result<Product, CoreError> {
        let id = parse_id(id)?;
        let products = self.products.read().await;

        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    pub async fn create(&self, req: CreateProductRequest) -> Product {
        let product = Product::from_request(req);

        let mut products = self.products.write().await;
        products.push(product.clone());

        info!(id = %product.id, category = %product.category, "created product");
        product
    }

    pub async fn update(&self, id: &str, req: UpdateProductRequest) -> Result<Product, CoreError> {
        let id = parse_id(id)?;
        let mut products = self.products.write().await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;
        product.apply(req);

        info!(id = %product.id, "updated product");
        Ok(product.clone())
    }

    /// 删除是幂等的，返回是否真的移除了记录
    pub async fn delete(&self, id: &str) -> bool {
        let Ok(id) = Uuid::parse_str(id) else {
            return false;
        };

        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        let removed = products.len() != before;

        if removed {
            info!(%id, "deleted product");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    /// 写入几条示例商品
    pub async fn seed_sample_data(&self) {
        let samples = [
            ("Mechanical Keyboard", "Hot-swappable, 87 keys", 89.0, "electronics", true),
            ("USB-C Hub", "7-in-1 aluminium hub", 34.5, "electronics", true),
            ("Pour-over Kettle", "Gooseneck, 1L", 42.0, "kitchen", false),
            ("Chef Knife", "8 inch, stainless", 59.9, "kitchen", true),
            ("Trail Backpack", "28L, water resistant", 75.0, "outdoor", true),
        ];

        for (name, description, price, category, in_stock) in samples {
            self.create(CreateProductRequest {
                name: name.to_string(),
                description: description.to_string(),
                price,
                category: category.to_string(),
                in_stock,
            })
            .await;
        }

        info!("seeded {} sample products", self.count().await);
    }
}

// 不是合法 UUID 的 id 不可能存在于集合中
fn parse_id(id: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(id).map_err(|_| not_found())
}

fn not_found() -> CoreError {
    CoreError::NotFound(NOT_FOUND_MESSAGE.to_string())
}
