//! Tracing setup and span constructors.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured filter. Returns an error if a
/// subscriber is already installed or the filter does not parse.
pub fn init(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span for translating one MODE line.
    pub fn mode_change(channel: &str, source: Option<&str>) -> Span {
        match source {
            Some(source) => info_span!("mode_change", channel = %channel, source = %source),
            None => info_span!("mode_change", channel = %channel, source = "internal"),
        }
    }

    /// Span for loading a dialect module.
    pub fn dialect_load(name: &str) -> Span {
        info_span!("dialect_load", dialect = %name)
    }
}
