//! Event handler trait with no-op defaults.

use super::types::*;

/// Observer of engine lifecycle events.
///
/// Every method has a no-op default so handlers implement only what they
/// care about.
pub trait VigilEventHandler: Send + Sync {
    fn on_analysis_started(&self, _event: &AnalysisStartedEvent) {}
    fn on_plugin_skipped(&self, _event: &PluginSkippedEvent) {}
    fn on_analysis_completed(&self, _event: &AnalysisCompletedEvent) {}
    fn on_analysis_failed(&self, _event: &AnalysisFailedEvent) {}
    fn on_pattern_loaded(&self, _event: &PatternLoadedEvent) {}
}
