//! Trait seams between the orchestrator and its collaborators.

pub mod cancellation;
pub mod stats;
pub mod store;

pub use cancellation::{Cancellable, CancellationToken};
pub use stats::StatsStore;
pub use store::AnalysisStore;
