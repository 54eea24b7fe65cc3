//! Configuration system for Vigil.
//! TOML-based, layered resolution: env > project > defaults.

pub mod engine_config;
pub mod storage_config;
pub mod telemetry_config;
pub mod vigil_config;

pub use engine_config::EngineConfig;
pub use storage_config::StorageConfig;
pub use telemetry_config::TelemetryConfig;
pub use vigil_config::VigilConfig;
