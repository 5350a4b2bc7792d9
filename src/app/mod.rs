//! 应用层：路由与共享状态

pub mod health;
pub mod product;

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::core::middleware::request_logging_middleware;
use product::{handler, ProductService};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            product_service: ProductService::new(&config.catalog),
        }
    }
}

/// 组装全部路由和中间件
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(health::api_info))
        .route("/health", get(health::health_check))
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route("/products/stats", get(handler::product_stats))
        .route(
            "/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
