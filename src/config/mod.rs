//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, defaults)
//! - Browser-like request header values
//! - CLI/environment option types and the immutable proxy configuration

mod constants;
mod headers;
mod types;

pub use constants::*;
pub use headers::*;
pub use types::{Config, LogFormat, LogLevel, ProxyConfig, ProxyCredentials, RelayScheme};
