//! Logging system setup.
//!
//! Structured logging via `tracing`, with the filter taken from the
//! `RUST_LOG` environment variable when set and from the configuration
//! otherwise.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

/// Initializes the global tracing subscriber. Call once, before any other
/// startup work that logs.
pub fn setup_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);

    if settings.json_format {
        registry.with(fmt::layer().json().with_target(false)).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()?;
    }

    Ok(())
}
