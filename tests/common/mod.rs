use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt as _;

use helpdesk::{api, store::Memory};

/// Builds the API router over a fresh in-memory store. The store handle is
/// returned too so tests can seed or inspect the persisted collection
/// directly, or knock the store over.
pub fn app() -> (Router, Arc<Memory>) {
    let store = Arc::new(Memory::new());
    (api::router(store.clone()), store)
}

pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("failed to build a request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("failed to send a request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read a response body");

    // Error responses carry plain-text messages; wrap those so callers can
    // still assert on them.
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    });
    (status, value)
}

pub async fn create(app: &Router, title: &str) -> Value {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/tickets",
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

pub async fn list(app: &Router) -> Vec<Value> {
    let (status, body) =
        request(app, Method::GET, "/api/tickets", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("expected an array").clone()
}
