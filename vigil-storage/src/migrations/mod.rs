//! Schema migrations, applied in order and tracked in `schema_version`.

pub mod v001_initial;

use rusqlite::Connection;
use vigil_core::errors::StorageError;

use crate::connection::writer::with_immediate_transaction;

/// Ordered list of all migrations.
const MIGRATIONS: &[(u32, &str)] = &[(1, v001_initial::MIGRATION_SQL)];

/// Apply every pending migration.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL) STRICT;",
    )
    .map_err(|e| StorageError::Sqlite {
        message: format!("failed to create schema_version: {e}"),
    })?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| StorageError::Sqlite {
            message: format!("failed to read schema version: {e}"),
        })?;

    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        with_immediate_transaction(conn, |tx| {
            tx.execute_batch(sql).map_err(|e| StorageError::Migration {
                version: *version,
                message: e.to_string(),
            })?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [*version],
            )
            .map_err(|e| StorageError::Migration {
                version: *version,
                message: e.to_string(),
            })?;
            Ok(())
        })?;
        tracing::debug!(version = *version, "applied schema migration");
    }

    Ok(())
}

/// Current schema version (0 when no migration has run).
pub fn schema_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::Sqlite {
        message: e.to_string(),
    })
}
