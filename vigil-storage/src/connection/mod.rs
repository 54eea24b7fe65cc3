//! Connection management — one serialized connection per database.

pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use vigil_core::errors::StorageError;

use self::pragmas::apply_pragmas;
use crate::migrations;

/// Owns the database connection behind a mutex.
///
/// All access — reads included — is serialized through the one connection.
/// That is the single-writer discipline the statistics service requires, and
/// it makes in-memory databases behave identically to file-backed ones.
pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path, busy_timeout_ms: u64) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::Sqlite {
            message: e.to_string(),
        })?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::Sqlite {
            message: e.to_string(),
        })?;
        apply_pragmas(&conn, 5_000)?;
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Execute an operation with the serialized connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::Sqlite {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Run a WAL checkpoint (TRUNCATE mode).
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(|e| StorageError::Sqlite {
                    message: e.to_string(),
                })
        })
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
