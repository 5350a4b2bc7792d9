//! 商品处理器

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};

use super::model::{CreateProductRequest, ListProductsQuery, Product, UpdateProductRequest};
use crate::app::AppState;
use crate::core::{error::CoreError, response::Page, validation::ValidatedJson};

/// 获取商品列表 (支持 category / search / page / limit)
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<Page<Product>>, CoreError> {
    let Query(query) = query.map_err(|rejection| CoreError::BadRequest(rejection.body_text()))?;
    Ok(Json(state.product_service.list(query).await))
}

/// 按分类统计
pub async fn product_stats(State(state): State<AppState>) -> Json<BTreeMap<String, usize>> {
    Json(state.product_service.stats().await)
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.get(&id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> (StatusCode, Json<Product>) {
    let product = state.product_service.create(payload).await;
    (StatusCode::CREATED, Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.update(&id, payload).await?;
    Ok(Json(product))
}

/// 删除商品，id 不存在也返回 204
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    state.product_service.delete(&id).await;
    StatusCode::NO_CONTENT
}
