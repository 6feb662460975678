//! API server HTTP handlers.

mod pages;
mod proxy;
mod scrape;

pub use pages::{demo_handler, index_handler, not_found_handler};
pub use proxy::{proxy_config_handler, test_proxy_handler};
pub use scrape::{build_envelope, scrape_handler};
