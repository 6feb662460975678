// Shared test helpers for building the router and issuing requests.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use scrape_api::{build_router, AppState, Config, LogFormat, LogLevel};

/// A config suited to tests: short timeouts, quiet logging, no relays.
#[allow(dead_code)] // Used by other test files
pub fn test_config(public_dir: &Path) -> Config {
    Config {
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        public_dir: public_dir.to_path_buf(),
        user_agent: "scrape_api_test/1.0".to_string(),
        timeout_seconds: 5,
        deadline_seconds: 10,
        ..Default::default()
    }
}

/// Builds the full application router for `config`.
pub fn router_for(config: &Config) -> Router {
    let state = AppState::from_config(config).expect("Failed to build app state");
    build_router(state)
}

/// Issues a GET and returns status, headers and raw body.
pub async fn get(router: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, headers, body.to_vec())
}

/// Issues a GET and parses the body as JSON.
#[allow(dead_code)] // Used by other test files
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = get(router, uri).await;
    let json = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("Body of {} is not JSON ({}): {:?}", uri, e, body));
    (status, json)
}

/// Percent-encodes a value for use in a query string.
#[allow(dead_code)] // Used by other test files
pub fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
