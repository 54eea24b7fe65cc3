//! Core crate for the Vigil analysis engine.
//!
//! Holds the shared vocabulary of the workspace: domain types, per-subsystem
//! error enums, layered configuration, the event system, trait seams consumed
//! by the orchestrator, and small time/tracing helpers.

pub mod config;
pub mod errors;
pub mod events;
pub mod telemetry;
pub mod time;
pub mod traits;
pub mod types;

pub use config::VigilConfig;
pub use errors::{
    AnalyzeError, ConfigError, EngineError, PatternError, RegistryError, StorageError,
};
pub use types::{
    Analysis, AnalysisStatus, HistoryRecord, Issue, IssueCategory, Language, Metrics, Severity,
    UsageStats, UsageSummary,
};
