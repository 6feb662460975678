//! Integration tests for `/scrape`
//!
//! These tests drive the full router against wiremock upstreams and verify:
//! - Input validation and its error bodies
//! - Every extraction mode end to end
//! - The https to http downgrade
//! - Deadline and fetch failure responses

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{encode, get_json, router_for, test_config};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>  Fixture Page  </title>
  <style>.hero { color: red; }</style>
  <script>window.answer = 42;</script>
</head>
<body>
  <div class="hero" style="background-image: url('/img/hero.jpg')"></div>
  <img src="/img/logo.png"><img src="img/logo.png"><img src="https://cdn.example.net/a.gif">
  <p>Hello&nbsp;&nbsp;world, &lt;b&gt;bold&lt;/b&gt; claims.</p>
  <a href="/about">About</a>
  <a href="https://other.example/">Other</a>
  <a href="/about">About (again)</a>
  <a href="mailto:hi@example.com">Mail</a>
  <script src="/external.js"></script>
</body>
</html>"#;

async fn page_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;
    server
}

fn scrape_uri(url: &str, mode: Option<&str>) -> String {
    match mode {
        Some(mode) => format!("/scrape?url={}&type={}", encode(url), mode),
        None => format!("/scrape?url={}", encode(url)),
    }
}

#[tokio::test]
async fn test_missing_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    for uri in ["/scrape", "/scrape?url=", "/scrape?type=links", "/scrape?url=%20%20"] {
        let (status, body) = get_json(&router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            body,
            json!({ "message": "Please provide a valid URL as a query parameter (e.g., ?url=https://example.com)" }),
            "{uri}"
        );
    }
}

#[tokio::test]
async fn test_invalid_mode_lists_valid_modes() {
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, body) = get_json(&router, "/scrape?url=example.com&type=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid method. Please use one of the following: html, images, text, links, scripts"
    );
}

#[tokio::test]
async fn test_undecodable_query_is_json_400() {
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    for uri in ["/scrape?url=a.com&url=b.com", "/scrape?url=a.com&type=html&type=text"] {
        let (status, body) = get_json(&router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Invalid query string:"), "{uri}: {message}");
    }
}

#[tokio::test]
async fn test_unparseable_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, body) = get_json(&router, &scrape_uri("http://", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid URL"));
}

#[tokio::test]
async fn test_default_mode_returns_raw_html() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, body) = get_json(&router, &scrape_uri(&format!("{}/page", server.uri()), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Raw HTML");
    assert_eq!(body["pageTitle"], "Fixture Page");
    assert_eq!(body["proxyUsed"], "direct");
    assert_eq!(body["ipUsed"], "direct");
    assert_eq!(body["result"], PAGE);
}

#[tokio::test]
async fn test_links_are_deduplicated_in_order() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, body) = get_json(
        &router,
        &scrape_uri(&format!("{}/page", server.uri()), Some("links")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Links extracted successfully");
    assert_eq!(
        body["result"],
        json!([
            { "url": format!("{}/about", server.uri()), "text": "About" },
            { "url": "https://other.example/", "text": "Other" },
            { "url": "mailto:hi@example.com", "text": "Mail" },
        ])
    );
}

#[tokio::test]
async fn test_images_are_absolute_and_unique() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, body) = get_json(
        &router,
        &scrape_uri(&format!("{}/page", server.uri()), Some("images")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Images");
    assert_eq!(
        body["result"],
        json!([
            { "src": format!("{}/img/logo.png", server.uri()) },
            { "src": "https://cdn.example.net/a.gif" },
            { "src": format!("{}/img/hero.jpg", server.uri()) },
        ])
    );
}

#[tokio::test]
async fn test_text_is_clean() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, body) = get_json(
        &router,
        &scrape_uri(&format!("{}/page", server.uri()), Some("text")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Text");

    let text = body["result"].as_str().unwrap();
    assert!(!text.contains("window.answer"));
    assert!(!text.contains("color: red"));
    assert!(!text.contains("<b>"));
    assert!(!text.contains("  "));
    assert_eq!(
        text,
        "Fixture Page Hello world, bold claims. About Other About (again) Mail"
    );
}

#[tokio::test]
async fn test_scripts_are_joined() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));

    let (status, body) = get_json(
        &router,
        &scrape_uri(&format!("{}/page", server.uri()), Some("scripts")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Scripts extracted successfully");
    assert_eq!(body["result"], "window.answer = 42;\n");
}

#[tokio::test]
async fn test_https_failure_downgrades_once() {
    // wiremock speaks plain HTTP, so the https attempt fails its handshake
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));
    let https_url = format!("{}/page", server.uri()).replacen("http://", "https://", 1);

    let (status, body) = get_json(&router, &scrape_uri(&https_url, Some("links"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["proxyUsed"], "direct");
    assert_eq!(body["ipUsed"], "http-downgrade");
    // links resolve against the URL actually served
    assert_eq!(body["result"][0]["url"], format!("{}/about", server.uri()));
}

#[tokio::test]
async fn test_upstream_error_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let router = router_for(&test_config(dir.path()));
    let url = format!("{}/missing", server.uri());

    let (status, body) = get_json(&router, &scrape_uri(&url, None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error fetching the website");
    assert_eq!(body["url"], url);
    assert_eq!(body["error_type"], "Not Found (404)");
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_deadline_returns_408_without_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = scrape_api::Config {
        deadline_seconds: 1,
        ..test_config(dir.path())
    };
    let router = router_for(&config);

    let (status, body) = get_json(
        &router,
        &scrape_uri(&format!("{}/slow", server.uri()), Some("links")),
    )
    .await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["message"], "Scraping timed out after 1 seconds");
    assert_eq!(body["proxyUsed"], "direct");
    assert_eq!(body["ipUsed"], "direct");
    assert!(body.get("result").is_none());
}
