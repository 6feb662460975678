//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - Outbound HTTP clients (direct and per relay)
//!
//! All initialization functions return `InitializationError` on failure.

mod client;
mod logger;

pub use client::{init_direct_client, init_relay_client, ClientSettings};
pub use logger::init_logger_with;
