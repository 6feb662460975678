//! scrape_api library: web page scraping over HTTP
//!
//! This library serves a small JSON API that fetches a web page, optionally
//! through a chain of proxy relays, and returns one view of it: raw HTML,
//! image references, visible text, links, or inline scripts.
//!
//! # Example
//!
//! ```no_run
//! use scrape_api::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     port: 8080,
//!     proxy_enabled: true,
//!     proxy_address: Some("relay.internal:3128".to_string()),
//!     ..Default::default()
//! };
//!
//! run_server(&config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod parse;
pub mod server;
mod utils;

// Re-export public API
pub use app::{normalize_url, UrlValidationError};
pub use config::{Config, LogFormat, LogLevel, ProxyConfig, ProxyCredentials, RelayScheme};
pub use error_handling::{ErrorType, InitializationError};
pub use fetch::{FetchError, FetchOutcome, Fetcher, NetworkPath, ProxyError, RelayIdentity};
pub use server::{build_router, run_server, ApiError, AppState};
