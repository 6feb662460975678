//! Configuration constants.
//!
//! Defaults for the server, the fetch pipeline and response limits.

/// Default listen address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port for the HTTP server.
pub const DEFAULT_PORT: u16 = 3000;

/// Directory holding `index.html`, `demo.html` and other static assets.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

// Fetch timing
/// Per-attempt timeout in seconds (direct, downgrade or relay attempt).
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
/// Wall-clock deadline in seconds for the whole fallback sequence of one request.
///
/// Larger than the per-attempt timeout so a slow first attempt still leaves
/// room for one fallback.
pub const DEFAULT_SCRAPE_DEADLINE_SECS: u64 = 45;
/// Upper bound accepted for either timeout setting (one day).
pub const MAX_TIMEOUT_SECS: u64 = 86_400;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for outbound page fetches.
///
/// Users can override this via the `--user-agent` flag or `USER_AGENT`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// URL probed by `/api/test-proxy`.
pub const DEFAULT_DIAGNOSTIC_URL: &str = "https://httpbin.org/ip";

/// Maximum redirect hops followed by the outbound client.
pub const MAX_REDIRECT_HOPS: usize = 10;

// URL validation
/// Maximum accepted length of the `url` query parameter, after normalization.
/// Matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Error message limits
/// Maximum error message length in characters placed in a response body.
/// Longer messages are truncated with a note about the original length.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;
