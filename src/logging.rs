//! Logging setup
//!
//! Structured logging through `tracing`, with pretty output for interactive
//! use and JSON output for log shipping.

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub use tracing_subscriber::util::TryInitError;

/// Build the filter directive used when `RUST_LOG` is not set
pub fn default_directive(level: &str) -> String {
    format!("health_analytics={}", level)
}

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    if config.format == "json" {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr);

        Registry::default().with(env_filter).with(layer).try_init()?;
    } else {
        let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

        Registry::default().with(env_filter).with(layer).try_init()?;
    }

    tracing::debug!(
        level = %config.level,
        format = %config.format,
        "Logging initialized"
    );

    Ok(())
}
