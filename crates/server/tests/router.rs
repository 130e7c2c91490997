use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::metrics::InventoryMetrics;
use server::{routes, AppState};
use service::inventory::mock::MockInventoryRepository;

fn app() -> (Arc<MockInventoryRepository>, Router) {
    let repo = Arc::new(MockInventoryRepository::default());
    let metrics = Arc::new(InventoryMetrics::new().unwrap());
    let router = routes::build_router(AppState::new(repo.clone(), metrics), CorsLayer::very_permissive());
    (repo, router)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder.header(header::CONTENT_TYPE, "application/json").body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, headers, json)
}

fn location(headers: &HeaderMap) -> &str {
    headers.get(header::LOCATION).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

async fn create_brand(app: &Router, name: &str) -> Value {
    let (status, _, body) = send(app, "POST", "/inventory/brand/create", Some(json!({"brand_name": name}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn create_category(app: &Router, name: &str) -> Value {
    let (status, _, body) = send(app, "POST", "/inventory/category/create", Some(json!({"name": name}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn health_is_ok() {
    let (_, app) = app();
    let (status, _, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn brand_create_is_idempotent_and_located() {
    let (repo, app) = app();
    let (status, headers, first) = send(&app, "POST", "/inventory/brand/create", Some(json!({"brand_name": " Acme "}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["brand_name"], "Acme");
    assert_eq!(location(&headers), format!("/inventory/brand/{}", first["id"].as_str().unwrap()));

    let again = create_brand(&app, "Acme").await;
    assert_eq!(again["id"], first["id"]);
    assert_eq!(repo.snapshot().brands.len(), 1);

    let (status, _, body) = send(&app, "POST", "/inventory/brand/create", Some(json!({"brand_name": "  "}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["message"], "Brand name is required.");
}

#[tokio::test]
async fn invalid_item_returns_form_state() {
    let (repo, app) = app();
    let brand = create_brand(&app, "Acme").await;
    let tools = create_category(&app, "Tools").await;
    let _garden = create_category(&app, "Garden").await;

    let form = json!({"name": "Rake", "brand": brand["id"], "count": "-3", "category": tools["id"]});
    let (status, _, body) = send(&app, "POST", "/inventory/item/create", Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "count");
    assert_eq!(body["form"]["item"]["count"], "-3");
    let checked: Vec<(String, bool)> = body["form"]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["name"].as_str().unwrap().to_string(), c["checked"].as_bool().unwrap()))
        .collect();
    assert_eq!(checked, vec![("Garden".to_string(), false), ("Tools".to_string(), true)]);
    assert!(repo.snapshot().items.is_empty());
}

#[tokio::test]
async fn item_lifecycle() {
    let (_, app) = app();
    let brand = create_brand(&app, "Acme").await;
    let tools = create_category(&app, "Tools").await;

    let form = json!({"name": "Hammer", "brand": brand["id"], "count": 2, "category": [tools["id"], tools["id"]]});
    let (status, headers, item) = send(&app, "POST", "/inventory/item/create", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = item["id"].as_str().unwrap().to_string();
    assert_eq!(location(&headers), format!("/inventory/item/{id}"));
    assert_eq!(item["category_ids"].as_array().unwrap().len(), 1);

    let (status, _, detail) = send(&app, "GET", &format!("/inventory/item/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["brand"]["brand_name"], "Acme");
    assert_eq!(detail["categories"][0]["name"], "Tools");

    let (_, _, edit) = send(&app, "GET", &format!("/inventory/item/{id}/update"), None).await;
    assert_eq!(edit["categories"][0]["checked"], true);

    let update = json!({"name": "Claw Hammer", "brand": brand["id"], "count": "5"});
    let (status, _, updated) = send(&app, "POST", &format!("/inventory/item/{id}/update"), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["count"], 5);
    assert!(updated["category_ids"].as_array().unwrap().is_empty());

    let (_, _, list) = send(&app, "GET", "/inventory", None).await;
    assert_eq!(list[0]["name"], "Claw Hammer");

    let (status, headers, _) = send(&app, "POST", &format!("/inventory/item/{id}/delete"), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/inventory/items");

    // a second delete is still a redirect
    let (status, _, _) = send(&app, "POST", &format!("/inventory/item/{id}/delete"), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let (status, headers, _) = send(&app, "GET", &format!("/inventory/item/{id}/delete"), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/inventory/items");
}

#[tokio::test]
async fn referenced_brand_delete_conflicts() {
    let (repo, app) = app();
    let brand = create_brand(&app, "Acme").await;
    let id = brand["id"].as_str().unwrap().to_string();
    let form = json!({"name": "Widget", "brand": id, "count": 1});
    let (status, _, _) = send(&app, "POST", "/inventory/item/create", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, guard) = send(&app, "GET", &format!("/inventory/brand/{id}/delete"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(guard["target"]["kind"], "brand");
    assert_eq!(guard["dependents"][0]["name"], "Widget");

    let (status, _, body) = send(&app, "POST", &format!("/inventory/brand/{id}/delete"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["dependents"].as_array().unwrap().len(), 1);
    assert_eq!(repo.snapshot().brands.len(), 1);

    let (_, _, page) = send(&app, "GET", &format!("/inventory/brand/{id}"), None).await;
    assert_eq!(page["items"][0]["name"], "Widget");
}

#[tokio::test]
async fn unreferenced_category_delete_redirects() {
    let (repo, app) = app();
    let cat = create_category(&app, "Spare").await;
    let id = cat["id"].as_str().unwrap().to_string();

    let (status, headers, _) = send(&app, "POST", &format!("/inventory/category/{id}/delete"), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/inventory/categories");
    assert!(repo.snapshot().categories.is_empty());

    let (status, _, _) = send(&app, "POST", &format!("/inventory/category/{id}/delete"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, headers, _) = send(&app, "GET", &format!("/inventory/category/{id}/delete"), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/inventory/categories");
}

#[tokio::test]
async fn malformed_and_unknown_ids_are_not_found() {
    let (_, app) = app();
    let (status, _, _) = send(&app, "GET", "/inventory/brand/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, body) = send(&app, "GET", &format!("/inventory/item/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "item not found");
    assert_eq!(body["code"], 2002);
    let (status, _, _) = send(&app, "POST", &format!("/inventory/category/{}/update", Uuid::new_v4()), Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let (repo, app) = app();
    repo.fail_with("connection refused");
    let (status, _, body) = send(&app, "GET", "/inventory/brands", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 2100);
}

#[tokio::test]
async fn metrics_count_mutations() {
    let (_, app) = app();
    create_brand(&app, "Acme").await;
    let (status, _, _) = send(&app, "POST", "/inventory/item/create", Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert!(text.contains(r#"inventory_mutations_total{entity="brand",op="create"} 1"#));
    assert!(text.contains("inventory_validation_failures_total 1"));
}

async fn metrics_text(app: &Router) -> String {
    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    String::from_utf8(to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap()
}

#[tokio::test]
async fn deleting_missing_item_is_not_counted() {
    let (_, app) = app();
    let (status, _, _) = send(&app, "POST", &format!("/inventory/item/{}/delete", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(!metrics_text(&app).await.contains(r#"op="delete""#));

    let brand = create_brand(&app, "Acme").await;
    let (_, _, item) = send(&app, "POST", "/inventory/item/create", Some(json!({"name": "Saw", "brand": brand["id"], "count": 1}))).await;
    let id = item["id"].as_str().unwrap().to_string();
    send(&app, "POST", &format!("/inventory/item/{id}/delete"), None).await;
    send(&app, "POST", &format!("/inventory/item/{id}/delete"), None).await;
    assert!(metrics_text(&app).await.contains(r#"inventory_mutations_total{entity="item",op="delete"} 1"#));
}
