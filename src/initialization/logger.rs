//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Quiet defaults first, then `RUST_LOG`, then the CLI level.
fn apply_filters(builder: &mut env_logger::Builder, level: LevelFilter, rust_log: Option<&str>) {
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);

    if let Some(directives) = rust_log {
        builder.parse_filters(directives);
    }

    builder.filter_level(level);
    builder.filter_module("scrape_api", level);
}

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// Directives from the `RUST_LOG` environment variable are applied over the
/// built-in defaults for noisy dependencies. The provided `level` is applied
/// last, so it wins for this crate and for the global filter.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=reqwest=debug scrape_api --log-level debug
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::new();
    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    apply_filters(&mut builder, level, rust_log.as_deref());

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    log::Level::Error => "❌",
                    log::Level::Warn => "⚠️",
                    log::Level::Info => "✔️",
                    log::Level::Debug => "🔍",
                    log::Level::Trace => "🔬",
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init: tests may initialize the logger more than once
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
