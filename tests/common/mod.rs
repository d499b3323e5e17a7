// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
};
use fittrack::config::Config;
use fittrack::db::MemoryStore;
use fittrack::routes::create_router;
use fittrack::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, Arc::new(MemoryStore::new())));
    (create_router(state.clone()), state)
}

/// Create a test JWT token.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: uuid::Uuid, signing_key: &[u8]) -> String {
    fittrack::middleware::auth::create_jwt(user_id, signing_key).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Send a JSON request, optionally with a bearer token.
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Sign up a user and return their session token.
#[allow(dead_code)]
pub async fn signup(app: &axum::Router, email: &str) -> String {
    let response = send_json(
        app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "email": email,
            "password": "correct horse battery",
            "fullName": "Test User"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}
