//! Tests for the Vigil configuration system.

use std::sync::Mutex;

use vigil_core::config::VigilConfig;
use vigil_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all VIGIL_ env vars to prevent cross-test contamination.
fn clear_vigil_env_vars() {
    for key in [
        "VIGIL_ENGINE_TIMEOUT_MS",
        "VIGIL_ENGINE_PARALLEL_PLUGINS",
        "VIGIL_ENGINE_MAX_COMPLEXITY",
        "VIGIL_STORAGE_DB_PATH",
        "VIGIL_TELEMETRY_ENABLED",
        "VIGIL_TELEMETRY_FILTER",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn load_missing_files_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    let config = VigilConfig::load(dir.path()).unwrap();

    assert_eq!(config.engine.effective_timeout_ms(), 30_000);
    assert!(config.engine.effective_parallel());
    assert_eq!(config.storage.effective_db_path(), "vigil.db");
    assert_eq!(config.telemetry.effective_filter(), "info");
}

#[test]
fn env_overrides_project_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("vigil.toml"),
        r#"
[engine]
submission_timeout_ms = 10000
"#,
    )
    .unwrap();

    std::env::set_var("VIGIL_ENGINE_TIMEOUT_MS", "60000");

    let config = VigilConfig::load(dir.path()).unwrap();
    assert_eq!(config.engine.submission_timeout_ms, Some(60_000));

    clear_vigil_env_vars();
}

#[test]
fn invalid_toml_syntax_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("vigil.toml"), "this is not valid toml {{{{").unwrap();

    match VigilConfig::load(dir.path()) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {other:?}"),
    }
}

#[test]
fn zero_timeout_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("vigil.toml"),
        r#"
[engine]
submission_timeout_ms = 0
"#,
    )
    .unwrap();

    match VigilConfig::load(dir.path()) {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "engine.submission_timeout_ms");
        }
        other => panic!("Expected ValidationFailed, got: {other:?}"),
    }
}

#[test]
fn unrecognized_keys_accepted() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("vigil.toml"),
        r#"
[engine]
submission_timeout_ms = 5000
future_unknown_key = "hello"

[future_section]
another_key = 42
"#,
    )
    .unwrap();

    assert!(VigilConfig::load(dir.path()).is_ok());
}

#[test]
fn config_round_trip() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_vigil_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("vigil.toml"),
        r#"
[engine]
submission_timeout_ms = 15000
parallel_plugins = false
enabled_plugins = ["patterns", "complexity"]

[storage]
db_path = "custom.db"

[telemetry]
filter = "vigil=debug"
"#,
    )
    .unwrap();

    let config1 = VigilConfig::load(dir.path()).unwrap();
    let toml_str = config1.to_toml().unwrap();
    let config2 = VigilConfig::from_toml(&toml_str).unwrap();

    assert_eq!(
        config1.engine.submission_timeout_ms,
        config2.engine.submission_timeout_ms
    );
    assert_eq!(config1.engine.parallel_plugins, config2.engine.parallel_plugins);
    assert_eq!(config1.engine.enabled_plugins, config2.engine.enabled_plugins);
    assert_eq!(config1.storage.db_path, config2.storage.db_path);
    assert_eq!(config1.telemetry.filter, config2.telemetry.filter);
}
