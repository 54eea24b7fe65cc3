//! Event payload types.

/// Payload for `on_analysis_started`.
#[derive(Debug, Clone)]
pub struct AnalysisStartedEvent {
    pub analysis_id: i64,
    pub language: String,
    pub plugin_count: usize,
}

/// Payload for `on_plugin_skipped`.
#[derive(Debug, Clone)]
pub struct PluginSkippedEvent {
    pub analysis_id: i64,
    pub plugin: String,
    pub reason: String,
}

/// Payload for `on_analysis_completed`.
#[derive(Debug, Clone)]
pub struct AnalysisCompletedEvent {
    pub analysis_id: i64,
    pub issue_count: usize,
    pub global_score: f64,
    pub duration_ms: u64,
}

/// Payload for `on_analysis_failed`.
#[derive(Debug, Clone)]
pub struct AnalysisFailedEvent {
    pub analysis_id: i64,
    pub error_code: String,
    pub message: String,
}

/// Payload for `on_pattern_loaded`.
#[derive(Debug, Clone)]
pub struct PatternLoadedEvent {
    pub language: Option<String>,
    pub pattern_count: usize,
}
