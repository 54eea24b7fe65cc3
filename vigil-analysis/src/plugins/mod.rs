//! Analyzer plugins — the engine's extensibility contract.
//!
//! A plugin declares its name, supported languages, and categories, and turns
//! a submission into issues plus metrics. The registry holds the process-wide
//! name bindings, populated once at bootstrap.

pub mod complexity_plugin;
pub mod duplication_plugin;
pub mod pattern_plugin;
pub mod registry;
pub mod traits;

pub use complexity_plugin::ComplexityAnalyzer;
pub use duplication_plugin::DuplicationAnalyzer;
pub use pattern_plugin::PatternAnalyzer;
pub use registry::PluginRegistry;
pub use traits::{AnalysisRequest, AnalyzerPlugin, PluginOutput};
