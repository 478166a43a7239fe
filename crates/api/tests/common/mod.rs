//! Shared helpers for API integration tests: an in-process app over the
//! in-memory worksheet, plus request/response plumbing.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use sitepulse_api::config::{ServerConfig, ViewMode};
use sitepulse_api::router::build_app_router;
use sitepulse_api::sessions::{SessionRegistry, SESSION_HEADER};
use sitepulse_api::state::AppState;
use sitepulse_store::{sample, InMemoryWorksheet, JobStore, Worksheet};

/// Budget every test dashboard starts from unless the session overrides it.
pub const TEST_BUDGET: f64 = 500_000.0;

pub fn test_config(view_mode: ViewMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 5,
        shutdown_timeout_secs: 1,
        view_mode,
        sheet_url: None,
        sample_data_path: "sample_data.csv".to_string(),
        default_budget: TEST_BUDGET,
        cache_ttl_secs: 300,
    }
}

/// Build the app over a worksheet seeded with the built-in dataset. The
/// worksheet handle comes back too, so tests can assert write counts.
pub async fn build_test_app(view_mode: ViewMode) -> (Router, Arc<InMemoryWorksheet>) {
    let worksheet =
        Arc::new(sample::seeded_worksheet("mem://test", sample::builtin_dataset()).await);
    let config = test_config(view_mode);
    let store = JobStore::new(
        Arc::clone(&worksheet) as Arc<dyn Worksheet>,
        Duration::from_secs(config.cache_ttl_secs),
        view_mode == ViewMode::Project,
    );
    let state = AppState {
        store: Arc::new(store),
        sessions: Arc::new(SessionRegistry::new()),
        config: Arc::new(config.clone()),
    };
    (build_app_router(state, &config), worksheet)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<axum::body::Body> {
    app.clone().oneshot(request).await.expect("request failed")
}

pub async fn get(app: &Router, uri: &str) -> Response<axum::body::Body> {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn get_with_session(app: &Router, uri: &str, session: Uuid) -> Response<axum::body::Body> {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header(SESSION_HEADER, session.to_string())
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<axum::body::Body> {
    json_request(app, "POST", uri, body, None).await
}

pub async fn post_json_with_session(
    app: &Router,
    uri: &str,
    body: Value,
    session: Uuid,
) -> Response<axum::body::Body> {
    json_request(app, "POST", uri, body, Some(session)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<axum::body::Body> {
    json_request(app, "PUT", uri, body, None).await
}

pub async fn put_json_with_session(
    app: &Router,
    uri: &str,
    body: Value,
    session: Uuid,
) -> Response<axum::body::Body> {
    json_request(app, "PUT", uri, body, Some(session)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<axum::body::Body> {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Value,
    session: Option<Uuid>,
) -> Response<axum::body::Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(session) = session {
        builder = builder.header(SESSION_HEADER, session.to_string());
    }
    send(
        app,
        builder
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<axum::body::Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

/// Read the body of a response expected to carry a given status, panicking
/// with the body text when the status differs.
pub async fn expect_json(response: Response<axum::body::Body>, status: StatusCode) -> Value {
    let actual = response.status();
    let body = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {body}");
    body
}
