//! Static page handlers.

use std::path::Path;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::super::types::AppState;

const INDEX_FILE: &str = "index.html";
const DEMO_FILE: &str = "demo.html";

async fn read_page(dir: &Path, name: &str) -> Option<String> {
    match tokio::fs::read_to_string(dir.join(name)).await {
        Ok(contents) => Some(contents),
        Err(e) => {
            log::debug!("Page {} unavailable in {}: {}", name, dir.display(), e);
            None
        }
    }
}

/// `GET /`: `index.html`, or a minimal page when it is missing.
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    match read_page(&state.public_dir, INDEX_FILE).await {
        Some(page) => Html(page),
        None => Html("<h1>Web Scraper API</h1>".to_string()),
    }
}

/// `GET /demo`: `demo.html`, or a 404 page when it is missing.
pub async fn demo_handler(State(state): State<AppState>) -> Response {
    match read_page(&state.public_dir, DEMO_FILE).await {
        Some(page) => Html(page).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>Demo file not found</h1>"),
        )
            .into_response(),
    }
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response()
}
