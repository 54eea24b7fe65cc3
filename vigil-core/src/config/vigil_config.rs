//! Top-level Vigil configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EngineConfig, StorageConfig, TelemetryConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VIGIL_*`)
/// 2. Project config (`vigil.toml` in project root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VigilConfig {
    pub engine: EngineConfig,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

impl VigilConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("vigil.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: VigilConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &VigilConfig) -> Result<(), ConfigError> {
        if let Some(timeout) = config.engine.submission_timeout_ms {
            if timeout == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.submission_timeout_ms".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(max) = config.engine.max_complexity {
            if max <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.max_complexity".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(busy) = config.storage.busy_timeout_ms {
            if busy == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.busy_timeout_ms".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut VigilConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: VigilConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut VigilConfig, other: &VigilConfig) {
        if other.engine.submission_timeout_ms.is_some() {
            base.engine.submission_timeout_ms = other.engine.submission_timeout_ms;
        }
        if other.engine.parallel_plugins.is_some() {
            base.engine.parallel_plugins = other.engine.parallel_plugins;
        }
        if !other.engine.enabled_plugins.is_empty() {
            base.engine.enabled_plugins = other.engine.enabled_plugins.clone();
        }
        if other.engine.max_complexity.is_some() {
            base.engine.max_complexity = other.engine.max_complexity;
        }

        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.busy_timeout_ms.is_some() {
            base.storage.busy_timeout_ms = other.storage.busy_timeout_ms;
        }

        if other.telemetry.enabled.is_some() {
            base.telemetry.enabled = other.telemetry.enabled;
        }
        if other.telemetry.filter.is_some() {
            base.telemetry.filter = other.telemetry.filter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VIGIL_ENGINE_TIMEOUT_MS`, `VIGIL_STORAGE_DB_PATH`, etc.
    fn apply_env_overrides(config: &mut VigilConfig) {
        if let Ok(val) = std::env::var("VIGIL_ENGINE_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.engine.submission_timeout_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VIGIL_ENGINE_PARALLEL_PLUGINS") {
            if let Ok(v) = val.parse::<bool>() {
                config.engine.parallel_plugins = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VIGIL_ENGINE_MAX_COMPLEXITY") {
            if let Ok(v) = val.parse::<f64>() {
                config.engine.max_complexity = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VIGIL_STORAGE_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("VIGIL_TELEMETRY_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.telemetry.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VIGIL_TELEMETRY_FILTER") {
            config.telemetry.filter = Some(val);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
