//! Logging setup
//!
//! Diagnostics go to stderr so that stdout carries only the report.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;
use crate::error::PreflightError;

/// Build the level filter. `RUST_LOG` wins over the configured level, and
/// `verbose` raises the configured level to debug.
#[must_use]
pub fn build_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { config.level.as_str() };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber.
///
/// Fails if a subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<(), PreflightError> {
    let filter = build_filter(config, verbose);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .pretty(),
            )
            .try_init()
    };

    result.map_err(|e| PreflightError::config(format!("Failed to initialise logging: {e}")))
}
