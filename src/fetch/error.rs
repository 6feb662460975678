//! Fetch and relay error types.

use std::error::Error as _;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use super::types::NetworkPath;
use crate::error_handling::{categorize_reqwest_error, categorize_status, ErrorType};

/// Why one attempt (direct, downgrade or relay) failed.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Network, TLS, timeout, redirect or body failure
    #[error("{}", describe_reqwest_error(.0))]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("upstream responded with {0}")]
    Status(StatusCode),
}

impl AttemptError {
    pub fn category(&self) -> ErrorType {
        match self {
            AttemptError::Request(e) => categorize_reqwest_error(e),
            AttemptError::Status(status) => categorize_status(*status),
        }
    }
}

/// Renders a reqwest error with its source chain; the top-level message alone
/// rarely says whether DNS, TCP or TLS failed.
fn describe_reqwest_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// A failed attempt together with where it was sent.
#[derive(Debug, Error)]
#[error("{path} ({url}): {cause}")]
pub struct AttemptFailure {
    pub path: NetworkPath,
    pub url: String,
    #[source]
    pub cause: AttemptError,
}

fn summarize(failures: &[AttemptFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn last_category(failures: &[AttemptFailure]) -> ErrorType {
    failures
        .last()
        .map(|failure| failure.cause.category())
        .unwrap_or(ErrorType::HttpRequestOtherError)
}

/// Failure of the whole fetch-with-fallback sequence.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every planned attempt failed
    #[error("all {} attempts to fetch {url} failed: {}", .failures.len(), summarize(.failures))]
    Exhausted {
        url: String,
        failures: Vec<AttemptFailure>,
    },

    /// The deadline elapsed before any attempt succeeded
    #[error("fetching {url} exceeded the {}s deadline on the {path} path", .deadline.as_secs())]
    Timeout {
        url: String,
        /// Path in flight when the deadline hit
        path: NetworkPath,
        deadline: Duration,
    },
}

impl FetchError {
    /// Category for the `error_type` response field: the last attempt's
    /// category, or `ScrapeTimeout`.
    pub fn category(&self) -> ErrorType {
        match self {
            FetchError::Exhausted { failures, .. } => last_category(failures),
            FetchError::Timeout { .. } => ErrorType::ScrapeTimeout,
        }
    }
}

/// Failure of routing a fetch through the relay chain.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("no proxy relay is configured")]
    NotConfigured,

    #[error("all {} relays failed for {url}: {}", .failures.len(), summarize(.failures))]
    Exhausted {
        url: String,
        failures: Vec<AttemptFailure>,
    },

    #[error("relaying {url} exceeded the {}s deadline on the {path} path", .deadline.as_secs())]
    Timeout {
        url: String,
        path: NetworkPath,
        deadline: Duration,
    },
}

impl ProxyError {
    pub fn category(&self) -> ErrorType {
        match self {
            ProxyError::NotConfigured => ErrorType::ProxyNotConfigured,
            ProxyError::Exhausted { failures, .. } => last_category(failures),
            ProxyError::Timeout { .. } => ErrorType::ScrapeTimeout,
        }
    }
}
