//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the sqlite persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database path. Default: `vigil.db` in the working directory.
    pub db_path: Option<String>,
    /// Sqlite busy timeout in milliseconds. Default: 5_000.
    pub busy_timeout_ms: Option<u64>,
}

impl StorageConfig {
    pub fn effective_db_path(&self) -> &str {
        self.db_path.as_deref().unwrap_or("vigil.db")
    }

    pub fn effective_busy_timeout_ms(&self) -> u64 {
        self.busy_timeout_ms.unwrap_or(5_000)
    }
}
