//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::VigilEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec —
/// effectively zero cost.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn VigilEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn VigilEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn VigilEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing");
            }
        }
    }

    pub fn emit_analysis_started(&self, event: &AnalysisStartedEvent) {
        self.emit(|h| h.on_analysis_started(event));
    }

    pub fn emit_plugin_skipped(&self, event: &PluginSkippedEvent) {
        self.emit(|h| h.on_plugin_skipped(event));
    }

    pub fn emit_analysis_completed(&self, event: &AnalysisCompletedEvent) {
        self.emit(|h| h.on_analysis_completed(event));
    }

    pub fn emit_analysis_failed(&self, event: &AnalysisFailedEvent) {
        self.emit(|h| h.on_analysis_failed(event));
    }

    pub fn emit_pattern_loaded(&self, event: &PatternLoadedEvent) {
        self.emit(|h| h.on_pattern_loaded(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
