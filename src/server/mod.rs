//! HTTP API server.
//!
//! Provides:
//! - `/scrape` - fetch a page and return one extraction view
//! - `/api/proxy-config` - non-secret relay configuration summary
//! - `/api/test-proxy` - probe the relay chain
//! - `/`, `/demo` and `/public/*` - static pages and assets
//!
//! Every route sits behind permissive CORS and the request logging / panic
//! guard middleware.

mod error;
pub mod handlers;
mod middleware;
mod types;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::app::shutdown_signal;
use crate::config::Config;
use handlers::{
    demo_handler, index_handler, not_found_handler, proxy_config_handler, scrape_handler,
    test_proxy_handler,
};

pub use error::ApiError;
pub use types::{
    AppState, ProxyConfigResponse, ProxyTestResponse, ResponseEnvelope, ScrapeMode, ScrapeQuery,
    ScrapeRequest, ScrapeResult,
};

/// Wraps `router` in the panic guard, then CORS outermost so every response,
/// including a panic 500, carries the CORS headers.
fn with_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(axum::middleware::from_fn(middleware::guard_and_log))
        .layer(cors)
}

/// Builds the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/scrape", get(scrape_handler))
        .route("/api/proxy-config", get(proxy_config_handler))
        .route("/api/test-proxy", get(test_proxy_handler))
        .route("/demo", get(demo_handler))
        .route("/", get(index_handler))
        .nest_service("/public", ServeDir::new(state.public_dir.as_path()))
        .fallback(not_found_handler)
        .with_state(state);

    with_middleware(router)
}

/// Builds the state from `config`, binds, and serves until a shutdown signal.
///
/// # Errors
///
/// Returns an error if a client cannot be created, the address cannot be
/// bound, or the server fails.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config).context("Failed to initialize outbound clients")?;
    log_startup(config, &state);

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind API server to {}", addr))?;

    log::info!("API server listening on http://{}/", addr);
    log::info!("  - Scrape: http://{}/scrape?url=example.com&type=links", addr);
    log::info!("  - Proxy config: http://{}/api/proxy-config", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    log::info!("API server stopped");
    Ok(())
}

fn log_startup(config: &Config, state: &AppState) {
    let proxy = &state.proxy;
    if proxy.enabled {
        log::info!(
            "Proxy routing enabled: {} relay(s), scheme {}, credentials {}, {}",
            state.fetcher.router().relay_count(),
            proxy.relay_scheme,
            if proxy.credentials.is_some() {
                "configured"
            } else {
                "not configured"
            },
            if proxy.prefer_direct_first {
                "direct first"
            } else {
                "relays first"
            }
        );
    } else {
        log::info!("Proxy routing disabled; fetching directly");
    }
    log::info!(
        "Per-attempt timeout {}s, scrape deadline {}s, public dir {}",
        config.timeout_seconds,
        config.deadline_seconds,
        config.public_dir.display()
    );
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    async fn explode() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_panic_response_carries_cors_headers() {
        let router = with_middleware(Router::new().route("/explode", get(explode)));

        let request = Request::builder()
            .uri("/explode")
            .header(header::ORIGIN, "https://somewhere.example")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
