//! HTTP client initialization.
//!
//! One client for direct fetches and one per proxy relay. Clients keep no idle
//! connections, so every fetch opens and closes its own connection and no
//! state leaks from one request to the next.

use std::time::Duration;

use reqwest::{ClientBuilder, Proxy};

use crate::config::{ProxyCredentials, MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;
use crate::fetch::request::browser_headers;

/// Settings shared by every outbound client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub user_agent: String,
    /// Per-attempt timeout
    pub timeout: Duration,
}

fn base_builder(settings: &ClientSettings) -> ClientBuilder {
    let connect_timeout = settings
        .timeout
        .min(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS));

    ClientBuilder::new()
        .timeout(settings.timeout)
        .connect_timeout(connect_timeout)
        .user_agent(settings.user_agent.clone())
        .default_headers(browser_headers())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .pool_max_idle_per_host(0)
}

/// Initializes the client used for direct fetches.
///
/// System proxy variables (`HTTP_PROXY`, …) are ignored: a direct fetch is
/// always direct, relays are configured explicitly.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_direct_client(settings: &ClientSettings) -> Result<reqwest::Client, InitializationError> {
    Ok(base_builder(settings).no_proxy().build()?)
}

/// Initializes a client that sends every request through one relay.
///
/// # Arguments
///
/// * `settings` - Shared client settings
/// * `identity` - Relay identity, used in error messages only
/// * `relay_url` - `scheme://host:port` of the relay
/// * `credentials` - Basic credentials presented to the relay, if any
///
/// # Errors
///
/// Returns `InitializationError::RelayConfigError` if reqwest rejects the relay URL.
pub fn init_relay_client(
    settings: &ClientSettings,
    identity: &str,
    relay_url: &str,
    credentials: Option<&ProxyCredentials>,
) -> Result<reqwest::Client, InitializationError> {
    let mut proxy = Proxy::all(relay_url).map_err(|source| InitializationError::RelayConfigError {
        identity: identity.to_string(),
        source,
    })?;
    if let Some(credentials) = credentials {
        proxy = proxy.basic_auth(&credentials.username, &credentials.password);
    }

    Ok(base_builder(settings).proxy(proxy).build()?)
}
