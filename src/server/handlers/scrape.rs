//! `/scrape` handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use scraper::Html;

use super::super::error::ApiError;
use super::super::types::{
    AppState, ResponseEnvelope, ScrapeMode, ScrapeQuery, ScrapeRequest, ScrapeResult,
};
use crate::error_handling::ErrorType;
use crate::fetch::FetchOutcome;
use crate::parse::{extract_images, extract_links, extract_scripts, extract_text, extract_title};

/// Parses the fetched page once and builds the response for `mode`.
///
/// URLs are resolved against the URL the page was served from.
pub fn build_envelope(mode: ScrapeMode, outcome: FetchOutcome) -> ResponseEnvelope {
    let document = Html::parse_document(&outcome.body);
    let page_title = extract_title(&document);
    let base = &outcome.final_url;

    let result = match mode {
        ScrapeMode::Html => ScrapeResult::Html(outcome.body.clone()),
        ScrapeMode::Images => ScrapeResult::Images(extract_images(&document, base)),
        ScrapeMode::Text => ScrapeResult::Text(extract_text(&document)),
        ScrapeMode::Links => ScrapeResult::Links(extract_links(&document, base)),
        ScrapeMode::Scripts => ScrapeResult::Scripts(extract_scripts(&document)),
    };

    ResponseEnvelope {
        message: mode.success_message(),
        page_title,
        proxy_used: outcome.path_used.provenance(),
        ip_used: outcome.path_used.to_string(),
        result,
    }
}

/// `GET /scrape?url=&type=`
pub async fn scrape_handler(
    State(state): State<AppState>,
    query: Result<Query<ScrapeQuery>, QueryRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let request = ScrapeRequest::from_query(&query)?;
    log::info!("Scraping {} ({})", request.url, request.mode);

    let outcome = state
        .fetcher
        .fetch(&request.url)
        .await
        .map_err(|e| ApiError::from_fetch(&request.url, e))?;

    // The parsed DOM is not Send; parsing and extraction run to completion on
    // a blocking thread.
    let mode = request.mode;
    let envelope = tokio::task::spawn_blocking(move || build_envelope(mode, outcome))
        .await
        .map_err(|e| ApiError::InternalError {
            url: Some(request.url.clone()),
            category: ErrorType::HandlerPanic,
            message: format!("extraction did not complete: {e}"),
        })?;

    Ok(Json(envelope))
}
