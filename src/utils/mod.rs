//! Shared utilities.
//!
//! This module provides:
//! - String sanitization for error messages
//! - CSS selector parsing with fallbacks
//! - Static regex compilation

mod patterns;
pub mod sanitize;
mod selector;

pub use patterns::compile_regex_unsafe;
pub use selector::{parse_selector_unsafe, parse_selector_with_fallback};
