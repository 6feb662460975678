//! Application helpers.
//!
//! URL normalization for incoming requests and shutdown signal handling for
//! the server.

pub mod shutdown;
pub mod url;

pub use self::shutdown::shutdown_signal;
pub use self::url::{has_http_scheme, insecure_equivalent, normalize_url, UrlValidationError};
