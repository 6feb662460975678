//! CSS selector parsing utilities.

use scraper::Selector;

/// Selector that matches nothing; used when a selector string fails to parse.
const MATCH_NOTHING: &str = "*:not(*)";

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches nothing
/// (`*:not(*)`), so extraction degrades to an empty result instead of a panic.
///
/// # Arguments
///
/// * `selector_str` - The CSS selector string to parse
/// * `context` - Context description for error logging (e.g., "link extraction")
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        parse_selector_unsafe(MATCH_NOTHING, "fallback selector")
    })
}

/// Parses a CSS selector that must succeed.
///
/// Only for compile-time constant selectors.
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}
