//! Proxy relay routing.
//!
//! The router owns one client per configured relay: the custom relay first
//! (with basic credentials when both parts are configured), then each
//! fallback relay in order. It turns a target URL into relay attempts for the
//! fetcher, and can walk the relay chain on its own for diagnostics.

use std::time::Duration;

use log::{debug, info};

use super::error::ProxyError;
use super::types::{FetchOutcome, NetworkPath, RelayIdentity};
use super::{run_sequence, Attempt, SequenceFailure};
use crate::app::has_http_scheme;
use crate::config::ProxyConfig;
use crate::error_handling::InitializationError;
use crate::initialization::{init_relay_client, ClientSettings};

/// One configured relay.
#[derive(Debug)]
struct Relay {
    identity: RelayIdentity,
    client: reqwest::Client,
}

/// Routes fetches through the configured relay chain.
#[derive(Debug)]
pub struct ProxyRouter {
    relays: Vec<Relay>,
    deadline: Duration,
}

/// `scheme://host:port` for a relay address given as `host:port`.
fn relay_url(config: &ProxyConfig, address: &str) -> String {
    if has_http_scheme(address) {
        address.to_string()
    } else {
        format!("{}://{}", config.relay_scheme, address)
    }
}

impl ProxyRouter {
    /// Builds one client per relay in `config`, in routing order.
    ///
    /// Relays are built even when routing is disabled so `/api/test-proxy`
    /// can probe them before they are switched on.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` if a relay address is rejected.
    pub fn new(
        config: &ProxyConfig,
        settings: &ClientSettings,
        deadline: Duration,
    ) -> Result<Self, InitializationError> {
        let mut relays = Vec::new();

        if let Some(address) = config.custom_relay() {
            let identity = RelayIdentity::Custom;
            let client = init_relay_client(
                settings,
                &identity.to_string(),
                &relay_url(config, address),
                config.credentials.as_ref(),
            )?;
            relays.push(Relay { identity, client });
        }

        for (index, address) in config.fallback_relays.iter().enumerate() {
            let identity = RelayIdentity::Fallback(index + 1);
            let client = init_relay_client(
                settings,
                &identity.to_string(),
                &relay_url(config, address),
                None,
            )?;
            relays.push(Relay { identity, client });
        }

        debug!(
            "Proxy router ready with {} relay(s), credentials {}",
            relays.len(),
            if config.credentials.is_some() {
                "configured"
            } else {
                "not configured"
            }
        );

        Ok(Self { relays, deadline })
    }

    /// Number of configured relays.
    pub fn relay_count(&self) -> usize {
        self.relays.len()
    }

    /// One attempt per relay, in routing order.
    pub(crate) fn attempts<'a>(&'a self, url: &str) -> Vec<Attempt<'a>> {
        self.relays
            .iter()
            .map(|relay| Attempt {
                path: NetworkPath::Relay(relay.identity),
                url: url.to_string(),
                client: &relay.client,
            })
            .collect()
    }

    /// Fetches `url` through the relay chain only, under the router deadline.
    ///
    /// # Errors
    ///
    /// - `ProxyError::NotConfigured` if there are no relays
    /// - `ProxyError::Exhausted` if every relay failed
    /// - `ProxyError::Timeout` if the deadline elapsed first
    pub async fn route_through_proxy(&self, url: &str) -> Result<FetchOutcome, ProxyError> {
        if self.relays.is_empty() {
            return Err(ProxyError::NotConfigured);
        }

        match run_sequence(self.attempts(url), self.deadline).await {
            Ok(outcome) => {
                info!("Relay chain fetched {} via {}", url, outcome.path_used);
                Ok(outcome)
            }
            Err(SequenceFailure::Exhausted(failures)) => Err(ProxyError::Exhausted {
                url: url.to_string(),
                failures,
            }),
            Err(SequenceFailure::DeadlineElapsed { path }) => Err(ProxyError::Timeout {
                url: url.to_string(),
                path,
                deadline: self.deadline,
            }),
        }
    }
}
