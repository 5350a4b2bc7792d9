use std::collections::HashSet;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use product_catalog::{app::product::Product, core::response::Page, router, AppState, Config};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let config = Config::default();
    router(AppState::new(&config), Duration::from_secs(5))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn product(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "price": 19.99,
        "category": category,
        "inStock": true
    })
}

async fn create(app: &Router, name: &str, category: &str) -> Value {
    let (status, body) = send(app, Method::POST, "/products", Some(product(name, category))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn created_products_are_unique_and_retrievable() {
    let app = app();
    let mut ids = HashSet::new();

    for i in 0..6 {
        let created = create(&app, &format!("Widget {}", i), "tools").await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, Method::GET, &format!("/products/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
        ids.insert(id);
    }

    assert_eq!(ids.len(), 6);
}

#[tokio::test]
async fn create_echoes_fields() {
    let app = app();
    let created = create(&app, "Desk Lamp", "home").await;

    assert_eq!(created["name"], "Desk Lamp");
    assert_eq!(created["description"], "Desk Lamp description");
    assert_eq!(created["price"], 19.99);
    assert_eq!(created["category"], "home");
    assert_eq!(created["inStock"], true);
}

#[tokio::test]
async fn list_defaults_to_five_per_page() {
    let app = app();
    for i in 0..7 {
        create(&app, &format!("Item {}", i), "misc").await;
    }

    let (status, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 7);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn pagination_windows() {
    let app = app();
    for i in 0..12 {
        create(&app, &format!("Item {}", i), "misc").await;
    }

    let (_, first) = send(&app, Method::GET, "/products?page=1&limit=5", None).await;
    let names: Vec<&str> = first["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Item 0", "Item 1", "Item 2", "Item 3", "Item 4"]);

    let (_, third) = send(&app, Method::GET, "/products?page=3&limit=5", None).await;
    let names: Vec<&str> = third["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Item 10", "Item 11"]);

    let (status, fourth) = send(&app, Method::GET, "/products?page=4&limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fourth["total"], 12);
    assert_eq!(fourth["page"], 4);
    assert!(fourth["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn large_limit_returns_full_page() {
    let app = app();
    for i in 0..120 {
        create(&app, &format!("Item {}", i), "bulk").await;
    }

    let (status, body) = send(&app, Method::GET, "/products?limit=120", None).await;
    assert_eq!(status, StatusCode::OK);

    let page: Page<Product> = serde_json::from_value(body).unwrap();
    assert_eq!(page.total, 120);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 120);
    assert_eq!(page.data.len(), 120);
    assert_eq!(page.data[119].name, "Item 119");
}

#[tokio::test]
async fn list_filters_by_category_and_search() {
    let app = app();
    create(&app, "Red Mug", "kitchen").await;
    create(&app, "Blue Mug", "kitchen").await;
    create(&app, "mug rack", "decor").await;
    create(&app, "Spoon", "Kitchen").await;

    let (_, kitchen) = send(&app, Method::GET, "/products?category=kitchen", None).await;
    assert_eq!(kitchen["total"], 2);
    for p in kitchen["data"].as_array().unwrap() {
        assert_eq!(p["category"], "kitchen");
    }

    let (_, mugs) = send(&app, Method::GET, "/products?search=MUG", None).await;
    assert_eq!(mugs["total"], 3);

    let (_, both) = send(&app, Method::GET, "/products?category=decor&search=rack", None).await;
    assert_eq!(both["total"], 1);
    assert_eq!(both["data"][0]["name"], "mug rack");
}

#[tokio::test]
async fn malformed_query_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/products?page=abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn stats_group_by_category() {
    let app = app();
    create(&app, "one", "a").await;
    create(&app, "two", "a").await;
    create(&app, "three", "b").await;

    let (status, body) = send(&app, Method::GET, "/products/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "a": 2, "b": 1 }));
}

#[tokio::test]
async fn stats_on_empty_collection() {
    let (status, body) = send(&app(), Method::GET, "/products/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn update_merges_and_preserves_id() {
    let app = app();
    let created = create(&app, "Chair", "furniture").await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/products/{}", id),
        Some(json!({
            "id": "11111111-1111-1111-1111-111111111111",
            "price": 45.0,
            "inStock": false
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["price"], 45.0);
    assert_eq!(updated["inStock"], false);
    assert_eq!(updated["name"], "Chair");
    assert_eq!(updated["category"], "furniture");

    let (_, fetched) = send(&app, Method::GET, &format!("/products/{}", id), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_rejects_explicit_null() {
    let app = app();
    let created = create(&app, "Chair", "furniture").await;
    let uri = format!("/products/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "name": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/products/5f0c7d7e-1b7a-4a53-9d0e-3f7a2e9c1b11",
        Some(json!({ "price": 1.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn update_validates_before_lookup() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/products/does-not-exist",
        Some(json!({ "price": -3.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    assert_eq!(body["details"][0]["field"], "price");
}

#[tokio::test]
async fn get_unknown_id_is_not_found_without_mutation() {
    let app = app();
    create(&app, "Only", "a").await;

    let (status, body) = send(&app, Method::GET, "/products/unknown-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (_, list) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn delete_removes_and_is_idempotent() {
    let app = app();
    let keep = create(&app, "Keep", "a").await;
    let gone = create(&app, "Gone", "a").await;
    let uri = format!("/products/{}", gone["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/products/never-existed", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["data"][0]["id"], keep["id"]);
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({
            "name": "",
            "description": "x",
            "price": -5,
            "category": "a",
            "inStock": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["name", "price"]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "name": "No price", "description": "", "category": "a", "inStock": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, _) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({
            "name": "Wrong type",
            "description": "",
            "price": 1.0,
            "category": "a",
            "inStock": "yes"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn health_reports_product_count() {
    let app = app();
    create(&app, "One", "a").await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["products"], 1);

    let (status, info) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["name"], "product-catalog");
}
