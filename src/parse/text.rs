//! Visible text extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::node::Node;
use scraper::Html;

use crate::utils::compile_regex_unsafe;

/// Elements whose content is never visible text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

// `\s` is Unicode-aware, so NBSP collapses too.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"\s+", "WHITESPACE_RE"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(r"<[^>]+>", "TAG_RE"));
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"&[a-zA-Z0-9#]+;", "ENTITY_RE"));

/// Extracts the visible text of a document as one line.
///
/// Text inside `script` and `style` is dropped. The remaining text nodes are
/// joined with single spaces, whitespace runs collapse to one space, and any
/// residual tag-like (`<...>`) or entity-like (`&name;`) substrings are
/// removed, so the result never contains them.
pub fn extract_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    // Iterative walk; nesting depth of real pages is unbounded.
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => parts.push(&**text),
            Node::Element(element) if SKIPPED_ELEMENTS.contains(&element.name()) => continue,
            _ => {}
        }
        stack.extend(node.children().rev());
    }

    clean_text(&parts.join(" "))
}

/// Normalizes extracted text: collapse, strip markup residue, collapse again.
///
/// Stripping repeats until nothing matches, since removing one entity can
/// splice a new one together (`&amp;a&amp;x;mp;`).
fn clean_text(raw: &str) -> String {
    let mut text = WHITESPACE_RE.replace_all(raw, " ").into_owned();
    while TAG_RE.is_match(&text) || ENTITY_RE.is_match(&text) {
        let without_tags = TAG_RE.replace_all(&text, "");
        text = ENTITY_RE.replace_all(&without_tags, "").into_owned();
    }
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
