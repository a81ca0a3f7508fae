//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lru_store::{api::create_router, cache::DynamicStore, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity: usize) -> Router {
    let state = AppState::new(DynamicStore::new(capacity).unwrap());
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn set(app: &Router, key: &str, value: Value) -> StatusCode {
    let (status, _) = send(app, "PUT", "/set", Some(json!({"key": key, "value": value}))).await;
    status
}

async fn keys(app: &Router) -> Vec<Value> {
    let (_, json) = send(app, "GET", "/keys", None).await;
    json["keys"].as_array().cloned().unwrap_or_default()
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app(4);

    let (status, json) = send(
        &app,
        "PUT",
        "/set",
        Some(json!({"key": "test_key", "value": "test_value"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("test_key"));
    assert_eq!(json["size"], 1);
}

#[tokio::test]
async fn test_set_endpoint_empty_key() {
    let app = create_test_app(4);

    let (status, json) = send(&app, "PUT", "/set", Some(json!({"key": "", "value": 1}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(4);
    assert_eq!(set(&app, "get_key", json!({"nested": [1, 2]})).await, StatusCode::OK);

    let (status, json) = send(&app, "GET", "/get/get_key", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], json!({"nested": [1, 2]}));
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(4);

    let (status, json) = send(&app, "GET", "/get/nonexistent_key", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

#[tokio::test]
async fn test_null_and_undefined_values_are_hits() {
    let app = create_test_app(4);
    set(&app, "null_key", Value::Null).await;
    send(&app, "PUT", "/set", Some(json!({"key": "undefined_key"}))).await;

    let (status, json) = send(&app, "GET", "/get/null_key", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"key": "null_key", "value": null}));

    let (status, json) = send(&app, "GET", "/get/undefined_key", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"key": "undefined_key"}));
}

#[tokio::test]
async fn test_numbers_round_trip_exactly() {
    let app = create_test_app(4);
    let samples = [
        ("int", json!(1)),
        ("big", json!(9007199254740993u64)),
        ("negative", json!(-7)),
        ("float", json!(2.5)),
    ];
    for (key, value) in &samples {
        assert_eq!(set(&app, key, value.clone()).await, StatusCode::OK);
    }

    for (key, value) in samples {
        let (status, json) = send(&app, "GET", &format!("/get/{key}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["value"], value);
    }
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app(4);
    set(&app, "delete_key", json!("delete_value")).await;

    let (status, json) = send(&app, "DELETE", "/del/delete_key", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], true);

    let (status, _) = send(&app, "GET", "/get/delete_key", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_key_is_ok() {
    let app = create_test_app(4);

    let (status, json) = send(&app, "DELETE", "/del/never_set", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], false);
}

// == Ordering and Eviction ==

#[tokio::test]
async fn test_keys_follow_recency_and_eviction() {
    let app = create_test_app(4);
    for key in ["a", "b", "c", "d"] {
        set(&app, key, json!(key)).await;
    }
    assert_eq!(keys(&app).await, vec![json!("d"), json!("c"), json!("b"), json!("a")]);

    send(&app, "GET", "/get/a", None).await;
    assert_eq!(keys(&app).await, vec![json!("a"), json!("d"), json!("c"), json!("b")]);

    set(&app, "e", json!("e")).await;
    assert_eq!(keys(&app).await, vec![json!("e"), json!("a"), json!("d"), json!("c")]);

    let (status, _) = send(&app, "GET", "/get/b", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, "GET", "/keys", None).await;
    assert_eq!(json["size"], 4);
    assert_eq!(json["capacity"], 4);
}

#[tokio::test]
async fn test_reset_endpoint() {
    let app = create_test_app(4);
    set(&app, "a", json!(1)).await;
    set(&app, "b", json!(2)).await;

    let (status, json) = send(&app, "POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], 2);

    assert!(keys(&app).await.is_empty());
    let (status, _) = send(&app, "GET", "/get/a", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == STATS / HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_tracks_operations() {
    let app = create_test_app(2);
    set(&app, "a", json!(1)).await;
    set(&app, "b", json!(2)).await;
    set(&app, "c", json!(3)).await;
    send(&app, "GET", "/get/c", None).await;
    send(&app, "GET", "/get/a", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["entries"], 2);
    assert_eq!(json["capacity"], 2);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(4);

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
