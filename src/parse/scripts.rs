//! Inline script extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe("script", "SCRIPT_SELECTOR"));

/// Concatenates the text of every `<script>` in document order, one per line.
///
/// External scripts (`src` only) contribute an empty line.
pub fn extract_scripts(document: &Html) -> String {
    document
        .select(&SCRIPT_SELECTOR)
        .map(|script| script.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
