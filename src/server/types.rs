//! Server data structures.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::error::ApiError;
use crate::app::normalize_url;
use crate::config::{Config, ProxyConfig};
use crate::fetch::Fetcher;
use crate::parse::{ExtractedImage, ExtractedLink};

/// Shared state for the API server.
///
/// Everything behind the `Arc`s is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<Fetcher>,
    pub proxy: Arc<ProxyConfig>,
    /// Directory holding `index.html`, `demo.html` and `/public` assets
    pub public_dir: Arc<PathBuf>,
    /// URL probed by `/api/test-proxy`
    pub diagnostic_url: Arc<str>,
}

impl AppState {
    /// Builds the state, including every outbound client, from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` if a client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self, crate::error_handling::InitializationError> {
        let proxy = config.proxy_config();
        let fetcher = Fetcher::new(
            &proxy,
            &config.user_agent,
            std::time::Duration::from_secs(config.deadline_seconds),
        )?;

        Ok(Self {
            fetcher: Arc::new(fetcher),
            proxy: Arc::new(proxy),
            public_dir: Arc::new(config.public_dir.clone()),
            diagnostic_url: Arc::from(config.diagnostic_url.as_str()),
        })
    }
}

/// Raw `/scrape` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapeQuery {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub mode: Option<String>,
}

/// Extraction mode requested with `type=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ScrapeMode {
    #[default]
    Html,
    Images,
    Text,
    Links,
    Scripts,
}

impl ScrapeMode {
    /// The `message` field of a successful response.
    pub fn success_message(&self) -> &'static str {
        match self {
            ScrapeMode::Html => "Raw HTML",
            ScrapeMode::Images => "Images",
            ScrapeMode::Text => "Text",
            ScrapeMode::Links => "Links extracted successfully",
            ScrapeMode::Scripts => "Scripts extracted successfully",
        }
    }

    /// `html, images, text, links, scripts`
    pub fn valid_values() -> String {
        ScrapeMode::iter()
            .map(|mode| mode.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A validated scrape request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    /// Normalized URL (always http or https)
    pub url: String,
    pub mode: ScrapeMode,
}

impl ScrapeRequest {
    /// Validates the raw query.
    ///
    /// Checks run in order: URL presence, mode, then URL shape. A missing or
    /// empty `type` selects raw HTML; matching is case-sensitive.
    pub fn from_query(query: &ScrapeQuery) -> Result<Self, ApiError> {
        let raw_url = query
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingUrl)?;

        let mode = match query.mode.as_deref().filter(|mode| !mode.is_empty()) {
            Some(mode) => ScrapeMode::from_str(mode).map_err(|_| ApiError::InvalidMode)?,
            None => ScrapeMode::default(),
        };

        let url = normalize_url(raw_url)?;
        Ok(Self { url, mode })
    }
}

/// The `result` field: a string or a list, depending on the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ScrapeResult {
    Html(String),
    Images(Vec<ExtractedImage>),
    Text(String),
    Links(Vec<ExtractedLink>),
    Scripts(String),
}

/// JSON body of a successful `/scrape`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub message: &'static str,
    pub page_title: String,
    /// `direct` or `relay:<identity>`
    pub proxy_used: String,
    /// Network path label, e.g. `http-downgrade` or `custom-proxy`
    pub ip_used: String,
    pub result: ScrapeResult,
}

/// JSON body of `/api/proxy-config`. Carries no addresses or credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfigResponse {
    pub enabled: bool,
    pub relay_configured: bool,
    pub relay_scheme: &'static str,
    pub authenticated: bool,
    pub fallback_relays: usize,
    pub timeout_seconds: u64,
    pub deadline_seconds: u64,
    pub prefer_direct_first: bool,
}

/// JSON body of a successful `/api/test-proxy` probe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyTestResponse {
    pub success: bool,
    pub message: String,
    pub proxy_used: String,
    pub ip_used: String,
    pub diagnostic_url: String,
    pub elapsed_ms: u64,
    pub body_bytes: usize,
}
