//! 服务信息与健康检查

use axum::{extract::State, response::Json};

use crate::app::AppState;

/// 服务信息
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "endpoints": {
            "GET /products": "List products, supports category, search, page, limit",
            "GET /products/stats": "Product count per category",
            "GET /products/:id": "Get a product",
            "POST /products": "Create a product",
            "PUT /products/:id": "Update a product",
            "DELETE /products/:id": "Delete a product",
            "GET /health": "Health check"
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "products": state.product_service.count().await
    }))
}
