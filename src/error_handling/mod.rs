//! Error handling.
//!
//! This module provides:
//! - Startup error types
//! - Failure categories reported to API clients
//! - Categorization of reqwest errors and upstream status codes

mod categorization;
mod types;

pub use categorization::{categorize_reqwest_error, categorize_status};
pub use types::{ErrorType, InitializationError};
