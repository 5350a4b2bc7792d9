//! # 商品目录服务
//!
//! 基于 Axum 的内存商品目录 REST 服务，分层结构：
//! - `app`: 路由、处理器和商品服务
//! - `core`: 错误处理、请求校验、响应结构和中间件
//! - `infrastructure`: 日志
//! - `config`: TOML 配置与环境变量覆盖

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use config::{Config, ConfigError};
pub use crate::core::error::CoreError;
