//! Page fetching with fallback.
//!
//! A fetch is an ordered list of attempts walked under one deadline:
//!
//! 1. Direct GET of the requested URL
//! 2. Direct GET of its `http://` equivalent, when the URL is `https://`
//! 3. Each configured relay in order, when proxy routing is enabled
//!
//! With routing enabled the relays run first unless `prefer_direct_first`
//! is set. The first 2xx response wins; there is no retry loop beyond the
//! planned attempts.

pub mod error;
pub mod proxy;
pub(crate) mod request;
pub mod types;


use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::{timeout_at, Instant};

use crate::app::insecure_equivalent;
use crate::config::ProxyConfig;
use crate::error_handling::InitializationError;
use crate::initialization::{init_direct_client, ClientSettings};

pub use error::{AttemptError, AttemptFailure, FetchError, ProxyError};
pub use proxy::ProxyRouter;
pub use types::{FetchOutcome, NetworkPath, RelayIdentity};

/// One planned GET: which path, which URL, which client.
#[derive(Debug)]
pub(crate) struct Attempt<'a> {
    pub(crate) path: NetworkPath,
    pub(crate) url: String,
    pub(crate) client: &'a reqwest::Client,
}

impl Attempt<'_> {
    async fn run(&self) -> Result<FetchOutcome, AttemptError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status));
        }

        let final_url = response.url().clone();
        let body = response.text().await?;

        Ok(FetchOutcome {
            body,
            path_used: self.path,
            final_url,
        })
    }
}

/// Why a sequence of attempts produced no page.
#[derive(Debug)]
pub(crate) enum SequenceFailure {
    Exhausted(Vec<AttemptFailure>),
    DeadlineElapsed { path: NetworkPath },
}

/// About 30 years out; what tokio itself uses for "never".
fn far_future(now: Instant) -> Instant {
    now + Duration::from_secs(86_400 * 365 * 30)
}

/// Walks `attempts` in order until one succeeds or `budget` runs out.
///
/// The in-flight attempt is dropped when the deadline elapses.
pub(crate) async fn run_sequence(
    attempts: Vec<Attempt<'_>>,
    budget: Duration,
) -> Result<FetchOutcome, SequenceFailure> {
    let now = Instant::now();
    let deadline = now.checked_add(budget).unwrap_or_else(|| far_future(now));
    let mut failures = Vec::with_capacity(attempts.len());

    for attempt in attempts {
        debug!("Attempting {} via {}", attempt.url, attempt.path);

        let result = timeout_at(deadline, attempt.run()).await;
        match result {
            Ok(Ok(outcome)) => {
                info!(
                    "Fetched {} via {} ({} bytes)",
                    attempt.url,
                    attempt.path,
                    outcome.body.len()
                );
                return Ok(outcome);
            }
            Ok(Err(cause)) => {
                warn!("Attempt via {} failed for {}: {}", attempt.path, attempt.url, cause);
                failures.push(AttemptFailure {
                    path: attempt.path,
                    url: attempt.url,
                    cause,
                });
            }
            Err(_) => {
                warn!(
                    "Deadline of {}s elapsed while fetching {} via {}",
                    budget.as_secs(),
                    attempt.url,
                    attempt.path
                );
                return Err(SequenceFailure::DeadlineElapsed { path: attempt.path });
            }
        }
    }

    Err(SequenceFailure::Exhausted(failures))
}

/// Fetches pages through the direct chain and the relay chain.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug)]
pub struct Fetcher {
    direct: reqwest::Client,
    router: ProxyRouter,
    routing_enabled: bool,
    prefer_direct_first: bool,
    deadline: Duration,
}

impl Fetcher {
    /// Builds the direct client and one client per configured relay.
    ///
    /// # Arguments
    ///
    /// * `proxy` - Relay configuration; relays are built even when disabled
    /// * `user_agent` - User-Agent for every outbound request
    /// * `deadline` - Budget for one whole fetch-with-fallback sequence
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` if a client cannot be created.
    pub fn new(
        proxy: &ProxyConfig,
        user_agent: &str,
        deadline: Duration,
    ) -> Result<Self, InitializationError> {
        let settings = ClientSettings {
            user_agent: user_agent.to_string(),
            timeout: Duration::from_secs(proxy.timeout_seconds),
        };

        let direct = init_direct_client(&settings)?;
        let router = ProxyRouter::new(proxy, &settings, deadline)?;
        let routing_enabled = proxy.has_relays();

        if proxy.enabled && !routing_enabled {
            warn!("Proxy routing is enabled but no relay is configured; fetching directly");
        }

        Ok(Self {
            direct,
            router,
            routing_enabled,
            prefer_direct_first: proxy.prefer_direct_first,
            deadline,
        })
    }

    pub fn router(&self) -> &ProxyRouter {
        &self.router
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    fn direct_attempts(&self, url: &str) -> Vec<Attempt<'_>> {
        let mut attempts = vec![Attempt {
            path: NetworkPath::Direct,
            url: url.to_string(),
            client: &self.direct,
        }];
        if let Some(insecure) = insecure_equivalent(url) {
            attempts.push(Attempt {
                path: NetworkPath::HttpDowngrade,
                url: insecure,
                client: &self.direct,
            });
        }
        attempts
    }

    /// The ordered attempts for `url`.
    pub(crate) fn plan(&self, url: &str) -> Vec<Attempt<'_>> {
        let direct = self.direct_attempts(url);
        if !self.routing_enabled {
            return direct;
        }

        let relays = self.router.attempts(url);
        if self.prefer_direct_first {
            direct.into_iter().chain(relays).collect()
        } else {
            relays.into_iter().chain(direct).collect()
        }
    }

    /// Fetches `url` (already normalized), applying the fallback plan.
    ///
    /// # Errors
    ///
    /// - `FetchError::Exhausted` if every attempt failed
    /// - `FetchError::Timeout` if the deadline elapsed first
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        match run_sequence(self.plan(url), self.deadline).await {
            Ok(outcome) => Ok(outcome),
            Err(SequenceFailure::Exhausted(failures)) => Err(FetchError::Exhausted {
                url: url.to_string(),
                failures,
            }),
            Err(SequenceFailure::DeadlineElapsed { path }) => Err(FetchError::Timeout {
                url: url.to_string(),
                path,
                deadline: self.deadline,
            }),
        }
    }
}
