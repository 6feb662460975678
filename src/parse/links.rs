//! Anchor link extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use super::html::resolve;

const ANCHOR_SELECTOR_STR: &str = "a[href]";

/// Prefixes kept verbatim instead of being resolved against the base URL.
const PASSTHROUGH_PREFIXES: &[&str] = &["http://", "https://", "tel:", "mailto:"];

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(ANCHOR_SELECTOR_STR, "ANCHOR_SELECTOR"));

/// A hyperlink found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedLink {
    /// Absolute target URL (or the `tel:`/`mailto:` value as written)
    pub url: String,
    /// Trimmed anchor text
    pub text: String,
}

/// Extracts every `<a href>` on the page.
///
/// Hrefs starting with `http://`, `https://`, `tel:` or `mailto:` pass
/// through unchanged; everything else is resolved against `base`. The result
/// is unique by `url` and keeps the first occurrence (and its text).
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `base` - URL the document was served from
pub fn extract_links(document: &Html, base: &Url) -> Vec<ExtractedLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.trim().is_empty() {
            continue;
        }

        let url = if PASSTHROUGH_PREFIXES
            .iter()
            .any(|prefix| href.starts_with(prefix))
        {
            href.to_string()
        } else {
            match resolve(base, href) {
                Some(url) => url,
                None => continue,
            }
        };

        if seen.insert(url.clone()) {
            let text = anchor.text().collect::<String>().trim().to_string();
            links.push(ExtractedLink { url, text });
        }
    }

    log::debug!("Extracted {} unique links", links.len());
    links
}
