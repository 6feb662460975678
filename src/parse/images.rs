//! Image reference extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use super::html::resolve;

const IMG_SELECTOR_STR: &str = "img[src]";
const STYLED_SELECTOR_STR: &str = "[style]";

/// `url(...)` in an inline style, with optional single or double quotes.
const CSS_URL_PATTERN: &str = r#"url\(['"]?([^'"()]+)['"]?\)"#;

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(IMG_SELECTOR_STR, "IMG_SELECTOR"));
static STYLED_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    crate::utils::parse_selector_unsafe(STYLED_SELECTOR_STR, "STYLED_SELECTOR")
});
static CSS_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| crate::utils::compile_regex_unsafe(CSS_URL_PATTERN, "CSS_URL_RE"));

/// An image referenced by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedImage {
    /// Absolute image URL
    pub src: String,
}

/// Extracts every image the page references.
///
/// Collects `<img src>` values first, then `url(...)` references from inline
/// `style` attributes, all resolved against `base`. The result is unique by
/// `src` and keeps first-seen order; empty or unresolvable values are skipped.
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `base` - URL the document was served from
pub fn extract_images(document: &Html, base: &Url) -> Vec<ExtractedImage> {
    let img_sources = document
        .select(&IMG_SELECTOR)
        .filter_map(|element| element.value().attr("src"));

    let style_sources = document
        .select(&STYLED_SELECTOR)
        .filter_map(|element| element.value().attr("style"))
        .flat_map(|style| {
            CSS_URL_RE
                .captures_iter(style)
                .filter_map(|captures| captures.get(1))
                .map(|m| m.as_str())
        });

    let mut seen = HashSet::new();
    let images: Vec<ExtractedImage> = img_sources
        .chain(style_sources)
        .filter(|src| !src.trim().is_empty())
        .filter_map(|src| resolve(base, src))
        .filter(|src| seen.insert(src.clone()))
        .map(|src| ExtractedImage { src })
        .collect();

    log::debug!("Extracted {} unique images", images.len());
    images
}
