//! Tracing initialization for embedding modules.

use tracing_subscriber::{EnvFilter, fmt};

use hookbridge_core::config::logging::LoggingConfig;

/// Initialize tracing/logging from the runtime configuration.
///
/// Uses a `try_init` so that a host process which already installed its own
/// subscriber is left untouched; the `RUST_LOG` environment variable takes
/// precedence over the configured level.
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("A tracing subscriber was already installed; keeping it");
    }
}
