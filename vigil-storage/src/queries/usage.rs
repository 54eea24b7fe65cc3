//! Queries for the usage counter tables.

use std::collections::BTreeMap;

use rusqlite::{params, Connection};
use vigil_core::errors::StorageError;
use vigil_core::types::UsageStats;

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}

/// Bump all counters for one terminal analysis. Caller wraps this together
/// with the history append in one transaction.
pub fn increment(
    conn: &Connection,
    analyzer: &str,
    date: &str,
    failed: bool,
    at_ms: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE usage_totals SET
            total_analyses = total_analyses + 1,
            errors = errors + ?1,
            last_analysis_at = ?2
         WHERE id = 1",
        params![if failed { 1 } else { 0 }, at_ms],
    )
    .map_err(sqlite_err)?;

    conn.execute(
        "INSERT INTO usage_by_analyzer (analyzer, count) VALUES (?1, 1)
         ON CONFLICT(analyzer) DO UPDATE SET count = count + 1",
        params![analyzer],
    )
    .map_err(sqlite_err)?;

    conn.execute(
        "INSERT INTO usage_by_date (date, count) VALUES (?1, 1)
         ON CONFLICT(date) DO UPDATE SET count = count + 1",
        params![date],
    )
    .map_err(sqlite_err)?;

    Ok(())
}

/// Read the full aggregate picture.
pub fn read(conn: &Connection) -> Result<UsageStats, StorageError> {
    let (total_analyses, errors, last_analysis_at) = conn
        .query_row(
            "SELECT total_analyses, errors, last_analysis_at FROM usage_totals WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)? as u64,
                    row.get::<_, i64>(1)? as u64,
                    row.get::<_, Option<i64>>(2)?,
                ))
            },
        )
        .map_err(sqlite_err)?;

    let mut by_analyzer = BTreeMap::new();
    let mut stmt = conn
        .prepare_cached("SELECT analyzer, count FROM usage_by_analyzer")
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        })
        .map_err(sqlite_err)?;
    for row in rows {
        let (analyzer, count) = row.map_err(sqlite_err)?;
        by_analyzer.insert(analyzer, count);
    }

    let mut by_date = BTreeMap::new();
    let mut stmt = conn
        .prepare_cached("SELECT date, count FROM usage_by_date")
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        })
        .map_err(sqlite_err)?;
    for row in rows {
        let (date, count) = row.map_err(sqlite_err)?;
        by_date.insert(date, count);
    }

    Ok(UsageStats {
        total_analyses,
        by_analyzer,
        by_date,
        errors,
        last_analysis_at,
    })
}

/// Reset every counter. Administrative reset only.
pub fn clear(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "UPDATE usage_totals SET total_analyses = 0, errors = 0, last_analysis_at = NULL
         WHERE id = 1;
         DELETE FROM usage_by_analyzer;
         DELETE FROM usage_by_date;",
    )
    .map_err(sqlite_err)
}
