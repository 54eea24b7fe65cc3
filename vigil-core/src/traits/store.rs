//! Persistence seam consumed by the orchestrator.

use crate::errors::StorageError;
use crate::types::{Analysis, AnalysisStatus, Language};

/// Stores and retrieves analysis records.
///
/// `save` is atomic: concurrent readers never observe a partially written
/// issue or metric set.
pub trait AnalysisStore: Send + Sync {
    /// Allocate a new pending analysis row and return its id.
    fn create_pending(
        &self,
        user_id: &str,
        language: Language,
        now_ms: i64,
    ) -> Result<i64, StorageError>;

    /// Atomic create/update of a full analysis record.
    fn save(&self, analysis: &Analysis) -> Result<(), StorageError>;

    /// Newest-first page of a user's analyses.
    fn get_by_user(
        &self,
        user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Analysis>, StorageError>;

    /// All analyses currently in `status`.
    fn get_by_status(&self, status: AnalysisStatus) -> Result<Vec<Analysis>, StorageError>;

    /// Full record including metrics and issues; `None` when absent.
    fn get_with_metrics(&self, id: i64) -> Result<Option<Analysis>, StorageError>;
}
