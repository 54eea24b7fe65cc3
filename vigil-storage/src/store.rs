//! Sqlite-backed analysis store.

use std::sync::Arc;

use vigil_core::errors::StorageError;
use vigil_core::traits::AnalysisStore;
use vigil_core::types::{Analysis, AnalysisStatus, Language};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::analyses;

/// Persistence for analysis records on the shared database.
pub struct SqliteStore {
    db: Arc<DatabaseManager>,
}

impl SqliteStore {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

impl AnalysisStore for SqliteStore {
    fn create_pending(
        &self,
        user_id: &str,
        language: Language,
        now_ms: i64,
    ) -> Result<i64, StorageError> {
        self.db
            .with_conn(|conn| analyses::insert_pending(conn, user_id, language, now_ms))
    }

    fn save(&self, analysis: &Analysis) -> Result<(), StorageError> {
        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| analyses::upsert(tx, analysis))
        })
    }

    fn get_by_user(
        &self,
        user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Analysis>, StorageError> {
        self.db
            .with_conn(|conn| analyses::query_by_user(conn, user_id, offset, limit))
    }

    fn get_by_status(&self, status: AnalysisStatus) -> Result<Vec<Analysis>, StorageError> {
        self.db
            .with_conn(|conn| analyses::query_by_status(conn, status))
    }

    fn get_with_metrics(&self, id: i64) -> Result<Option<Analysis>, StorageError> {
        self.db.with_conn(|conn| analyses::query_by_id(conn, id))
    }
}
