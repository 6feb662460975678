//! Fetch result and provenance types.

use std::fmt;

use url::Url;

/// Identity of a proxy relay, as exposed in provenance.
///
/// Addresses never appear here: clients see `custom` or `fallback-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayIdentity {
    /// The relay configured with `PROXY_ADDRESS`
    Custom,
    /// The N-th (1-based) relay from `PROXY_FALLBACKS`
    Fallback(usize),
}

impl fmt::Display for RelayIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayIdentity::Custom => f.write_str("custom"),
            RelayIdentity::Fallback(n) => write!(f, "fallback-{n}"),
        }
    }
}

/// The network path a fetch attempt took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkPath {
    /// Direct GET of the requested URL
    Direct,
    /// Direct GET of the `http://` equivalent of an `https://` URL
    HttpDowngrade,
    /// GET routed through a relay
    Relay(RelayIdentity),
}

impl NetworkPath {
    /// Provenance for the `proxyUsed` field: `direct` or `relay:<identity>`.
    pub fn provenance(&self) -> String {
        match self {
            NetworkPath::Direct | NetworkPath::HttpDowngrade => "direct".to_string(),
            NetworkPath::Relay(identity) => format!("relay:{identity}"),
        }
    }
}

/// Label for the `ipUsed` field and for logs, e.g. `custom-proxy`.
impl fmt::Display for NetworkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkPath::Direct => f.write_str("direct"),
            NetworkPath::HttpDowngrade => f.write_str("http-downgrade"),
            NetworkPath::Relay(RelayIdentity::Custom) => f.write_str("custom-proxy"),
            NetworkPath::Relay(RelayIdentity::Fallback(n)) => write!(f, "fallback-proxy-{n}"),
        }
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Decoded response body
    pub body: String,
    /// The path whose attempt succeeded
    pub path_used: NetworkPath,
    /// URL the body was served from (after downgrade and redirects)
    pub final_url: Url,
}
