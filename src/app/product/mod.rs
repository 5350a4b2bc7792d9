//! 商品资源：模型、服务与处理器

pub mod handler;
pub mod model;
pub mod service;

pub use model::Product;
pub use service::ProductService;
