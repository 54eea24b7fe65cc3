//! Plugin registry errors.

use super::error_code::{self, VigilErrorCode};

/// Errors raised by the plugin registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The plugin does not satisfy the analyzer contract.
    /// Fatal at bootstrap; registration is rejected.
    #[error("Plugin '{name}' violates the analyzer contract: {reason}")]
    ContractViolation { name: String, reason: String },

    /// No plugin is registered under the requested name. Caller-recoverable.
    #[error("No plugin registered under '{name}'")]
    NotFound { name: String },
}

impl VigilErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ContractViolation { .. } => error_code::REGISTRY_CONTRACT,
            Self::NotFound { .. } => error_code::REGISTRY_NOT_FOUND,
        }
    }
}
