//! Outbound request header values.
//!
//! These mimic a modern Chrome navigation so scraped sites serve the same
//! markup a browser would get. `Accept-Encoding` is left to reqwest, which
//! negotiates and decodes gzip/deflate/brotli itself.

/// `Accept` value for page navigations
pub const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
/// `Accept-Language` value
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Fetch metadata headers sent with every navigation.
pub const SEC_FETCH_HEADERS: &[(&str, &str)] = &[
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
];
