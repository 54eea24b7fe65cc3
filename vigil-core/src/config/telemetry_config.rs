//! Telemetry configuration.

use serde::{Deserialize, Serialize};

/// Configuration for tracing output.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable tracing output. Default: true.
    pub enabled: Option<bool>,
    /// Env-filter directive, e.g. "vigil=debug". Default: "info".
    pub filter: Option<String>,
}

impl TelemetryConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or("info")
    }
}
