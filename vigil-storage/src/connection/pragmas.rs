//! Connection pragmas applied to every new connection.

use rusqlite::Connection;
use vigil_core::errors::StorageError;

/// WAL for concurrent readers, NORMAL sync, and a busy timeout so writers
/// queue instead of erroring.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u64) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = {busy_timeout_ms};"
    ))
    .map_err(|e| StorageError::Sqlite {
        message: format!("failed to apply pragmas: {e}"),
    })
}
