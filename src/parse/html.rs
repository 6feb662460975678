//! Basic HTML extraction utilities.
//!
//! This module provides the page title and the shared URL resolution used by
//! the image and link extractors.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

// CSS selector strings
const TITLE_SELECTOR_STR: &str = "title";

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    crate::utils::parse_selector_with_fallback(TITLE_SELECTOR_STR, "TITLE_SELECTOR")
});

/// Extracts the page title from an HTML document.
///
/// Searches for the first `<title>` element and returns its text content,
/// trimmed of whitespace. Returns an empty string if there is no title.
///
/// # Arguments
///
/// * `document` - The parsed HTML document
pub fn extract_title(document: &Html) -> String {
    match document.select(&TITLE_SELECTOR).next() {
        Some(element) => {
            // text() decodes entities and flattens nested nodes
            let title = element.text().collect::<String>().trim().to_string();
            log::debug!("Extracted title text: '{}' (length: {})", title, title.len());
            title
        }
        None => {
            log::debug!("No title element found");
            String::new()
        }
    }
}

/// Resolves `reference` against `base` the way a browser would.
///
/// Returns `None` for values that cannot form an absolute URL.
pub(crate) fn resolve(base: &Url, reference: &str) -> Option<String> {
    match base.join(reference.trim()) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            log::debug!("Skipping unresolvable reference '{}': {}", reference, e);
            None
        }
    }
}
