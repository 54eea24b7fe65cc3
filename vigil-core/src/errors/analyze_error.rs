//! Errors raised while running analyzer plugins.

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur while a submission is being analyzed.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// The plugin cannot structurally process the content (binary data, bad
    /// encoding). Recorded as a skip; the submission continues.
    #[error("Plugin '{plugin}' cannot process this input: {reason}")]
    UnsupportedInput { plugin: String, reason: String },

    /// Unexpected plugin failure, including caught panics.
    /// Fails the whole submission and discards partial issues.
    #[error("Plugin '{plugin}' faulted: {message}")]
    PluginFault { plugin: String, message: String },

    /// The submission exceeded its configured deadline.
    /// Distinct from `PluginFault` so callers can apply retry policy.
    #[error("Analysis timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The submission was cancelled before completing.
    #[error("Analysis cancelled")]
    Cancelled,
}

impl VigilErrorCode for AnalyzeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedInput { .. } => error_code::ANALYZE_UNSUPPORTED_INPUT,
            Self::PluginFault { .. } => error_code::ANALYZE_PLUGIN_FAULT,
            Self::Timeout { .. } => error_code::ANALYZE_TIMEOUT,
            Self::Cancelled => error_code::ANALYZE_CANCELLED,
        }
    }
}
