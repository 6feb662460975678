//! Integration tests for static pages, assets, CORS and unknown routes

mod helpers;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use helpers::{get, get_json, router_for, test_config};

#[tokio::test]
async fn test_index_served_from_public_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Custom index</h1>").unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, headers, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(body, b"<h1>Custom index</h1>");
}

#[tokio::test]
async fn test_index_fallback_when_missing() {
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, _, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>Web Scraper API</h1>");
}

#[tokio::test]
async fn test_demo_served_and_missing() {
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, _, body) = get(&router, "/demo").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"<h1>Demo file not found</h1>");

    std::fs::write(dir.path().join("demo.html"), "<p>demo</p>").unwrap();
    let (status, _, body) = get(&router, "/demo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<p>demo</p>");
}

#[tokio::test]
async fn test_public_assets() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("app.css"), "body { margin: 0; }").unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, _, body) = get(&router, "/public/app.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body { margin: 0; }");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, body) = get_json(&router, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let request = Request::builder()
        .uri("/api/proxy-config")
        .header(header::ORIGIN, "https://somewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/scrape")
        .header(header::ORIGIN, "https://somewhere.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(preflight).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
