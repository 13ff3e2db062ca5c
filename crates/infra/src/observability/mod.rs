//! Structured logging setup
//!
//! The client crates only emit `tracing` events. Binaries and examples call
//! [`init_tracing`] once at startup to print them.

use captain_domain::{CaptainError, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event, for log aggregation
    Json,
}

/// Install a global subscriber filtered by `RUST_LOG`.
///
/// `default_directive` (e.g. `"info"` or `"captain_core=debug"`) applies when
/// `RUST_LOG` is unset or invalid.
///
/// # Errors
/// Returns `CaptainError::Config` if a global subscriber is already set.
pub fn init_tracing(default_directive: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => {
            registry.with(fmt::layer().json().flatten_event(true).with_current_span(false)).try_init()
        }
    };

    installed.map_err(|e| CaptainError::Config(format!("Failed to initialise tracing: {}", e)))
}
