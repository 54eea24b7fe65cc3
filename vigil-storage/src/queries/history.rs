//! Queries for the history table — append-only log of terminal analyses.

use rusqlite::{params, Connection};
use vigil_core::errors::StorageError;
use vigil_core::types::HistoryRecord;

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}

/// Append one history record. Returns the row id.
pub fn append(
    conn: &Connection,
    filename: &str,
    analyzer: &str,
    issues_count: u32,
    complexity: f64,
    score: f64,
    created_at: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO history (filename, analyzer, issues_count, complexity, score, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![filename, analyzer, issues_count, complexity, score, created_at],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

/// Newest-first history records, optionally limited.
pub fn query_recent(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<HistoryRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, filename, analyzer, issues_count, complexity, score, created_at
             FROM history ORDER BY created_at DESC, id DESC LIMIT ?1",
        )
        .map_err(sqlite_err)?;

    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let rows = stmt
        .query_map(params![limit], |row| {
            Ok(HistoryRecord {
                id: row.get(0)?,
                filename: row.get(1)?,
                analyzer: row.get(2)?,
                issues_count: row.get(3)?,
                complexity: row.get(4)?,
                score: row.get(5)?,
                created_at: row.get(6)?,
            })
        })
        .map_err(sqlite_err)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Count total history entries.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))
        .map_err(sqlite_err)
}

/// Aggregates over the whole log: (total, avg score, total issues,
/// avg complexity). Zeroes when the log is empty.
pub fn aggregates(conn: &Connection) -> Result<(u64, f64, u64, f64), StorageError> {
    conn.query_row(
        "SELECT COUNT(*),
                COALESCE(AVG(score), 0.0),
                COALESCE(SUM(issues_count), 0),
                COALESCE(AVG(complexity), 0.0)
         FROM history",
        [],
        |row| {
            Ok((
                row.get::<_, i64>(0)? as u64,
                row.get(1)?,
                row.get::<_, i64>(2)? as u64,
                row.get(3)?,
            ))
        },
    )
    .map_err(sqlite_err)
}

/// Remove every history row. Administrative reset only.
pub fn clear(conn: &Connection) -> Result<(), StorageError> {
    conn.execute("DELETE FROM history", [])
        .map_err(sqlite_err)?;
    Ok(())
}
