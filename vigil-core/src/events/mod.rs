//! Event system — synchronous dispatch to registered handlers.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::VigilEventHandler;
pub use types::{
    AnalysisCompletedEvent, AnalysisFailedEvent, AnalysisStartedEvent, PatternLoadedEvent,
    PluginSkippedEvent,
};
