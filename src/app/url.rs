//! URL validation and normalization utilities.

use thiserror::Error;

use crate::config::MAX_URL_LENGTH;

const SECURE_PREFIX: &str = "https://";
const INSECURE_PREFIX: &str = "http://";

/// Why a requested URL was rejected after normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL exceeds maximum length ({length} > {max})", max = MAX_URL_LENGTH)]
    TooLong { length: usize },

    #[error("URL could not be parsed: {0}")]
    Unparseable(#[from] url::ParseError),

    #[error("URL has no host")]
    MissingHost,
}

fn has_prefix_ignore_case(url: &str, prefix: &str) -> bool {
    url.len() >= prefix.len()
        && url.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Returns `true` if the URL starts with `http://` or `https://` (any case).
pub fn has_http_scheme(url: &str) -> bool {
    has_prefix_ignore_case(url, SECURE_PREFIX) || has_prefix_ignore_case(url, INSECURE_PREFIX)
}

/// Validates and normalizes a requested URL.
///
/// Prepends `https://` when the URL has no http/https scheme, then checks the
/// result is not longer than `MAX_URL_LENGTH` and parses with a host. The
/// normalized text is returned as typed (only the prefix is added), so it is
/// what gets fetched first.
pub fn normalize_url(raw: &str) -> Result<String, UrlValidationError> {
    let trimmed = raw.trim();

    let normalized = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{SECURE_PREFIX}{trimmed}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong {
            length: normalized.len(),
        });
    }

    let parsed = url::Url::parse(&normalized)?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(normalized)
}

/// Returns the `http://` equivalent of an `https://` URL.
///
/// `None` for any URL that does not use the secure scheme.
pub fn insecure_equivalent(url: &str) -> Option<String> {
    if has_prefix_ignore_case(url, SECURE_PREFIX) {
        Some(format!("{INSECURE_PREFIX}{}", &url[SECURE_PREFIX.len()..]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_adds_https() {
        assert_eq!(
            normalize_url("example.com"),
            Ok("https://example.com".to_string())
        );
    }

    #[test]
    fn test_normalize_url_preserves_https() {
        assert_eq!(
            normalize_url("https://example.com"),
            Ok("https://example.com".to_string())
        );
    }

    #[test]
    fn test_normalize_url_preserves_http() {
        assert_eq!(
            normalize_url("http://example.com"),
            Ok("http://example.com".to_string())
        );
    }

    #[test]
    fn test_normalize_url_scheme_is_case_insensitive() {
        assert_eq!(
            normalize_url("HTTPS://Example.com/Path"),
            Ok("HTTPS://Example.com/Path".to_string())
        );
    }

    #[test]
    fn test_normalize_url_trims_whitespace() {
        assert_eq!(
            normalize_url("  example.com/a  "),
            Ok("https://example.com/a".to_string())
        );
    }

    #[test]
    fn test_normalize_url_with_path_and_port() {
        assert_eq!(
            normalize_url("example.com:8080/path?query=value"),
            Ok("https://example.com:8080/path?query=value".to_string())
        );
    }

    #[test]
    fn test_normalize_url_ipv6() {
        assert_eq!(
            normalize_url("[2001:db8::1]/path"),
            Ok("https://[2001:db8::1]/path".to_string())
        );
    }

    #[test]
    fn test_normalize_url_rejects_invalid() {
        assert!(matches!(
            normalize_url("not a url at all!!!"),
            Err(UrlValidationError::Unparseable(_))
        ));
    }

    #[test]
    fn test_normalize_url_rejects_too_long() {
        let long = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            normalize_url(&long),
            Err(UrlValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_insecure_equivalent() {
        assert_eq!(
            insecure_equivalent("https://example.com/a?b=c"),
            Some("http://example.com/a?b=c".to_string())
        );
        assert_eq!(
            insecure_equivalent("HTTPS://example.com"),
            Some("http://example.com".to_string())
        );
        assert_eq!(insecure_equivalent("http://example.com"), None);
        assert_eq!(insecure_equivalent("example.com"), None);
    }

    #[test]
    fn test_has_http_scheme() {
        assert!(has_http_scheme("http://a"));
        assert!(has_http_scheme("Https://a"));
        assert!(!has_http_scheme("ftp://a"));
        assert!(!has_http_scheme("http:/a"));
        assert!(!has_http_scheme(""));
    }
}
