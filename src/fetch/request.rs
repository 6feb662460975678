//! Outbound request headers.
//!
//! Realistic browser headers reduce the chance that a scraped site serves a
//! bot wall instead of its real markup. They are installed as default headers
//! on every outbound client, direct or relayed, so all attempts of one
//! request present the same fingerprint.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL,
    UPGRADE_INSECURE_REQUESTS,
};

use crate::config::{ACCEPT_HTML, ACCEPT_LANGUAGE_VALUE, SEC_FETCH_HEADERS};

/// Builds the default header map for outbound page fetches.
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    for &(name, value) in SEC_FETCH_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers
}
