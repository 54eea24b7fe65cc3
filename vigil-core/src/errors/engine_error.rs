//! Engine errors — aggregates subsystem errors via `From` conversions.

use super::error_code::VigilErrorCode;
use super::{AnalyzeError, ConfigError, PatternError, RegistryError, StorageError};

/// Errors surfaced by the top-level engine API.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Analysis error: {0}")]
    Analyze(#[from] AnalyzeError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl VigilErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Registry(e) => e.error_code(),
            Self::Analyze(e) => e.error_code(),
            Self::Pattern(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
