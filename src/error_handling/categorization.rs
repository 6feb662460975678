//! Error categorization.
//!
//! Maps reqwest failures and upstream status codes onto [`ErrorType`] so every
//! surfaced error carries a stable category string.

use reqwest::StatusCode;

use super::types::ErrorType;

/// Categorizes an upstream HTTP status code.
///
/// Common codes get their own category; every other 4xx/5xx collapses into
/// `HttpRequestOtherError`, and anything else into `HttpRequestStatusError`.
pub fn categorize_status(status: StatusCode) -> ErrorType {
    match status.as_u16() {
        400 => ErrorType::HttpRequestBadRequest,
        401 => ErrorType::HttpRequestUnauthorized,
        403 => ErrorType::HttpRequestBotDetectionError,
        404 => ErrorType::HttpRequestNotFound,
        407 => ErrorType::HttpRequestProxyAuthRequired,
        429 => ErrorType::HttpRequestTooManyRequests,
        500 => ErrorType::HttpRequestInternalServerError,
        502 => ErrorType::HttpRequestBadGateway,
        503 => ErrorType::HttpRequestServiceUnavailable,
        504 => ErrorType::HttpRequestGatewayTimeout,
        _ if status.is_client_error() || status.is_server_error() => {
            ErrorType::HttpRequestOtherError
        }
        _ => ErrorType::HttpRequestStatusError,
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Status codes attached to the error win over the error kind.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status);
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}
