//! Tracing bootstrap.

use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Safe to call more than once;
/// later calls are no-ops.
pub fn init_tracing(config: &TelemetryConfig) {
    if !config.effective_enabled() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.effective_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
