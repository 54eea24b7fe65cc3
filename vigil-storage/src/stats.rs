//! Sqlite-backed statistics/history service.

use std::sync::Arc;

use vigil_core::errors::StorageError;
use vigil_core::time::date_bucket;
use vigil_core::traits::StatsStore;
use vigil_core::types::{Analysis, AnalysisStatus, HistoryRecord, UsageStats, UsageSummary};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::{history, usage};

/// Append-only history plus usage counters on the shared database.
///
/// `record` wraps the history append and every counter bump in one
/// BEGIN IMMEDIATE transaction: a crash or a failed submission can never
/// leave a history row without its counters or vice versa.
pub struct SqliteStats {
    db: Arc<DatabaseManager>,
}

impl SqliteStats {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

impl StatsStore for SqliteStats {
    fn record(
        &self,
        analysis: &Analysis,
        analyzer: &str,
        filename: &str,
    ) -> Result<(), StorageError> {
        let failed = analysis.status == AnalysisStatus::Failed;
        let at_ms = analysis.updated_at;
        let date = date_bucket(at_ms);

        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| {
                history::append(
                    tx,
                    filename,
                    analyzer,
                    analysis.issues.len() as u32,
                    analysis.complexity(),
                    analysis.global_score,
                    at_ms,
                )?;
                usage::increment(tx, analyzer, &date, failed, at_ms)
            })
        })
    }

    fn get_history(&self, limit: Option<u32>) -> Result<Vec<HistoryRecord>, StorageError> {
        self.db.with_conn(|conn| history::query_recent(conn, limit))
    }

    fn get_usage_stats(&self) -> Result<UsageStats, StorageError> {
        self.db.with_conn(usage::read)
    }

    fn get_summary(&self) -> Result<UsageSummary, StorageError> {
        self.db.with_conn(|conn| {
            let (total_files, average_score, total_issues, average_complexity) =
                history::aggregates(conn)?;
            let stats = usage::read(conn)?;
            Ok(UsageSummary {
                total_files,
                average_score,
                total_issues,
                average_complexity,
                error_rate: stats.error_rate(),
                last_analysis_at: stats.last_analysis_at,
            })
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| {
                history::clear(tx)?;
                usage::clear(tx)
            })
        })
    }
}
