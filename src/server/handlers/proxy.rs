//! Proxy diagnostics handlers.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::super::types::{AppState, ProxyConfigResponse, ProxyTestResponse};
use crate::fetch::ProxyError;
use crate::utils::sanitize::sanitize_and_truncate_error_message;

/// `GET /api/proxy-config`: non-secret summary of the relay configuration.
pub async fn proxy_config_handler(State(state): State<AppState>) -> Json<ProxyConfigResponse> {
    let proxy = &state.proxy;
    Json(ProxyConfigResponse {
        enabled: proxy.enabled,
        relay_configured: proxy.custom_relay().is_some(),
        relay_scheme: proxy.relay_scheme.as_str(),
        authenticated: proxy.credentials.is_some(),
        fallback_relays: proxy.fallback_relays.len(),
        timeout_seconds: proxy.timeout_seconds,
        deadline_seconds: state.fetcher.deadline().as_secs(),
        prefer_direct_first: proxy.prefer_direct_first,
    })
}

fn failure_status(error: &ProxyError) -> StatusCode {
    match error {
        ProxyError::NotConfigured => StatusCode::BAD_REQUEST,
        ProxyError::Exhausted { .. } => StatusCode::BAD_GATEWAY,
        ProxyError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
    }
}

/// `GET /api/test-proxy`: fetches the diagnostic URL through the relay chain.
///
/// Relays are probed even while routing is disabled. The fetched body is
/// never echoed back; only its size is reported.
pub async fn test_proxy_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let diagnostic_url = state.diagnostic_url.to_string();

    let result = state
        .fetcher
        .router()
        .route_through_proxy(&diagnostic_url)
        .await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(outcome) => {
            log::info!(
                "Proxy test succeeded via {} in {}ms",
                outcome.path_used,
                elapsed_ms
            );
            Json(ProxyTestResponse {
                success: true,
                message: format!("Relay reachable via {}", outcome.path_used),
                proxy_used: outcome.path_used.provenance(),
                ip_used: outcome.path_used.to_string(),
                diagnostic_url,
                elapsed_ms,
                body_bytes: outcome.body.len(),
            })
            .into_response()
        }
        Err(error) => {
            log::warn!("Proxy test failed: {}", error);
            let mut body = json!({
                "success": false,
                "message": "Proxy test failed",
                "error": sanitize_and_truncate_error_message(&error.to_string()),
                "error_type": error.category().as_str(),
                "diagnosticUrl": diagnostic_url,
                "elapsedMs": elapsed_ms,
                "enabled": state.proxy.enabled,
            });
            if let ProxyError::Timeout { path, .. } = &error {
                body["proxyUsed"] = json!(path.provenance());
                body["ipUsed"] = json!(path.to_string());
            }
            (failure_status(&error), Json(body)).into_response()
        }
    }
}
