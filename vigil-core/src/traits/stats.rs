//! Statistics/history seam consumed by the orchestrator.

use crate::errors::StorageError;
use crate::types::{Analysis, HistoryRecord, UsageStats, UsageSummary};

/// Append-only history log plus running usage counters.
///
/// `record` is atomic: the history append and every counter update land in
/// one transaction, so concurrent completions never lose an increment or
/// interleave a partial record.
pub trait StatsStore: Send + Sync {
    /// Append one history record and update the aggregate counters.
    fn record(
        &self,
        analysis: &Analysis,
        analyzer: &str,
        filename: &str,
    ) -> Result<(), StorageError>;

    /// Newest-first history records; `None` means no limit.
    fn get_history(&self, limit: Option<u32>) -> Result<Vec<HistoryRecord>, StorageError>;

    /// Current aggregate counters.
    fn get_usage_stats(&self) -> Result<UsageStats, StorageError>;

    /// Read-only derivation over the history log.
    fn get_summary(&self) -> Result<UsageSummary, StorageError>;

    /// Administrative reset only.
    fn clear(&self) -> Result<(), StorageError>;
}
