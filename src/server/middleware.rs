//! Request logging and the catch-all panic guard.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::FutureExt;
use serde_json::json;

use crate::error_handling::ErrorType;
use crate::utils::sanitize::sanitize_and_truncate_error_message;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Logs every request and turns a panicking handler into a 500.
///
/// The 500 body is `{message, error, error_type, url, method}`.
pub async fn guard_and_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            let detail = panic_message(payload.as_ref());
            log::error!("Handler panicked on {} {}: {}", method, uri, detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "Internal server error",
                    "error": sanitize_and_truncate_error_message(&detail),
                    "error_type": ErrorType::HandlerPanic.as_str(),
                    "url": uri.to_string(),
                    "method": method.as_str(),
                })),
            )
                .into_response()
        }
    };

    log::info!(
        "{} {} -> {} in {}ms",
        method,
        uri.path(),
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
