//! API error responses.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use super::types::ScrapeMode;
use crate::app::UrlValidationError;
use crate::error_handling::ErrorType;
use crate::fetch::{FetchError, NetworkPath};
use crate::utils::sanitize::sanitize_and_truncate_error_message;

/// Everything `/scrape` can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please provide a valid URL as a query parameter (e.g., ?url=https://example.com)")]
    MissingUrl,

    #[error("Invalid method. Please use one of the following: {}", ScrapeMode::valid_values())]
    InvalidMode,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),

    /// The query string could not be decoded (e.g. a repeated `url`).
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// Every attempt failed
    #[error("Error fetching the website")]
    FetchFailed {
        url: String,
        #[source]
        cause: FetchError,
    },

    /// The fetch deadline elapsed
    #[error("Scraping timed out after {} seconds", .deadline.as_secs())]
    ScrapeTimeout {
        /// Path in flight when the deadline hit
        path: NetworkPath,
        deadline: Duration,
        #[source]
        cause: FetchError,
    },

    #[error("Internal server error")]
    InternalError {
        url: Option<String>,
        category: ErrorType,
        message: String,
    },
}

impl ApiError {
    /// Maps a fetch failure: deadline to `ScrapeTimeout`, exhaustion to `FetchFailed`.
    pub fn from_fetch(url: &str, error: FetchError) -> Self {
        match error {
            FetchError::Timeout { path, deadline, .. } => ApiError::ScrapeTimeout {
                path,
                deadline,
                cause: error,
            },
            FetchError::Exhausted { .. } => ApiError::FetchFailed {
                url: url.to_string(),
                cause: error,
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl
            | ApiError::InvalidMode
            | ApiError::InvalidUrl(_)
            | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ScrapeTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ApiError::FetchFailed { .. } | ApiError::InternalError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        let body = match &self {
            ApiError::MissingUrl
            | ApiError::InvalidMode
            | ApiError::InvalidUrl(_)
            | ApiError::InvalidQuery(_) => {
                log::debug!("Rejected scrape request: {}", message);
                json!({ "message": message })
            }
            ApiError::FetchFailed { url, cause } => {
                log::error!("Failed to fetch {}: {}", url, cause);
                json!({
                    "message": message,
                    "error": sanitize_and_truncate_error_message(&cause.to_string()),
                    "url": url,
                    "error_type": cause.category().as_str(),
                })
            }
            ApiError::ScrapeTimeout { path, cause, .. } => {
                log::error!("{}", cause);
                json!({
                    "message": message,
                    "error": sanitize_and_truncate_error_message(&cause.to_string()),
                    "proxyUsed": path.provenance(),
                    "ipUsed": path.to_string(),
                })
            }
            ApiError::InternalError {
                url,
                category,
                message: detail,
            } => {
                log::error!("Internal error ({}): {}", category, detail);
                json!({
                    "message": message,
                    "error": sanitize_and_truncate_error_message(detail),
                    "url": url,
                    "error_type": category.as_str(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::fetch::{AttemptError, AttemptFailure, RelayIdentity};

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_query_response() {
        let (status, body) =
            body_json(ApiError::InvalidQuery("duplicate field `url`".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "message": "Invalid query string: duplicate field `url`" })
        );
    }

    #[tokio::test]
    async fn test_missing_url_response() {
        let (status, body) = body_json(ApiError::MissingUrl).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "message": "Please provide a valid URL as a query parameter (e.g., ?url=https://example.com)" })
        );
    }

    #[tokio::test]
    async fn test_invalid_mode_response() {
        let (status, body) = body_json(ApiError::InvalidMode).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Invalid method. Please use one of the following: html, images, text, links, scripts"
        );
    }

    #[tokio::test]
    async fn test_fetch_failed_response() {
        let error = ApiError::from_fetch(
            "https://example.com",
            FetchError::Exhausted {
                url: "https://example.com".to_string(),
                failures: vec![AttemptFailure {
                    path: NetworkPath::Direct,
                    url: "https://example.com".to_string(),
                    cause: AttemptError::Status(StatusCode::FORBIDDEN),
                }],
            },
        );
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error fetching the website");
        assert_eq!(body["url"], "https://example.com");
        assert_eq!(body["error_type"], "Bot detection (403 Forbidden)");
        assert!(body["error"].as_str().unwrap().contains("403"));
    }

    #[tokio::test]
    async fn test_timeout_response_has_no_result() {
        let error = ApiError::from_fetch(
            "https://slow.example",
            FetchError::Timeout {
                url: "https://slow.example".to_string(),
                path: NetworkPath::Relay(RelayIdentity::Fallback(1)),
                deadline: Duration::from_secs(45),
            },
        );
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body["message"], "Scraping timed out after 45 seconds");
        assert_eq!(body["proxyUsed"], "relay:fallback-1");
        assert_eq!(body["ipUsed"], "fallback-proxy-1");
        assert!(body.get("result").is_none());
    }

    #[tokio::test]
    async fn test_internal_error_sanitizes_detail() {
        let error = ApiError::InternalError {
            url: None,
            category: ErrorType::HandlerPanic,
            message: "boom\u{0}\u{1b}".to_string(),
        };
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "boom");
        assert_eq!(body["error_type"], "Handler panic");
        assert!(body["url"].is_null());
    }
}
