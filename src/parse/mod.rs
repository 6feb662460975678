//! HTML parsing and data extraction.
//!
//! This module derives the scrape views from a parsed document:
//! - Page title
//! - Image references (`<img src>` and inline `style` `url(...)`)
//! - Visible text
//! - Anchor links
//! - Inline script text
//!
//! All parsing is done using CSS selectors via the `scraper` crate. Every
//! extractor is a pure function of the document and, where URLs are
//! resolved, the URL the document was actually served from.

mod html;
mod images;
mod links;
mod scripts;
mod text;

// Re-export public API
pub use html::extract_title;
pub use images::{extract_images, ExtractedImage};
pub use links::{extract_links, ExtractedLink};
pub use scripts::extract_scripts;
pub use text::extract_text;
