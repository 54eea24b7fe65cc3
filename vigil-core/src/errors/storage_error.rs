//! Persistence errors.

use super::error_code::{self, VigilErrorCode};

/// Errors raised by the sqlite persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Sqlite error: {message}")]
    Sqlite { message: String },

    /// The requested analysis does not exist. Caller-recoverable.
    #[error("Analysis {id} not found")]
    NotFound { id: i64 },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Migration failed at version {version}: {message}")]
    Migration { version: u32, message: String },
}

impl VigilErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::STORAGE_NOT_FOUND,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
