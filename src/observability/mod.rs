//! Observability.
//!
//! The library only emits `tracing` events and `metrics` samples; both are
//! silent until the embedding application installs a subscriber or recorder.
//! [`init_logging`] installs a `tracing-subscriber` stack for applications
//! that have none of their own.

mod logging;

pub use logging::{ENV_LOG, ENV_LOG_FORMAT, LogFormat, LoggingConfig};

use crate::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global logging subscriber.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )
            .with(config.env_filter())
            .try_init()
            .map_err(init_error),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_names(true),
            )
            .with(config.env_filter())
            .try_init()
            .map_err(init_error),
    }
}

/// Helper to convert init errors.
#[allow(clippy::needless_pass_by_value)]
fn init_error(e: tracing_subscriber::util::TryInitError) -> Error {
    Error::InvalidConfig(format!("logging already initialized: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::from_lookup(|_| None);
        // Another test binary thread may have installed a subscriber first, so
        // only the second call's outcome is certain.
        let _ = init_logging(&config);
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
