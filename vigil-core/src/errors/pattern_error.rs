//! Pattern catalog errors.

use super::error_code::{self, VigilErrorCode};

/// Errors raised while loading or compiling detection patterns.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Pattern compilation failed: {0}")]
    CompileFailed(String),
}

impl VigilErrorCode for PatternError {
    fn error_code(&self) -> &'static str {
        error_code::PATTERN_ERROR
    }
}
