//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the analysis orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Submission-level deadline in milliseconds. Default: 30_000.
    pub submission_timeout_ms: Option<u64>,
    /// Run plugins of one submission in parallel. Default: true.
    pub parallel_plugins: Option<bool>,
    /// Restrict a submission to these plugins; empty means all applicable.
    #[serde(default)]
    pub enabled_plugins: Vec<String>,
    /// Complexity above which the complexity analyzer flags a function.
    /// Default: 10.0.
    pub max_complexity: Option<f64>,
}

impl EngineConfig {
    /// Effective submission deadline, defaulting to 30 seconds.
    pub fn effective_timeout_ms(&self) -> u64 {
        self.submission_timeout_ms.unwrap_or(30_000)
    }

    /// Effective plugin parallelism, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel_plugins.unwrap_or(true)
    }

    /// Effective complexity threshold, defaulting to 10.0.
    pub fn effective_max_complexity(&self) -> f64 {
        self.max_complexity.unwrap_or(10.0)
    }
}
