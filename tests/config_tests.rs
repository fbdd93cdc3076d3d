//! 配置加载测试
//!
//! Environment variables are process-wide, so every test that calls
//! `AppConfig::load` holds `ENV_LOCK`.

use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use ipcountry::config::{AppConfig, ConfigOverrides, DatastoreKind, LEGACY_ENV_KEYS};
use ipcountry::errors::IpCountryError;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Take the environment lock and start from a clean slate of legacy variables.
fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for (name, _) in LEGACY_ENV_KEYS {
        // SAFETY: ENV_LOCK serializes every test touching the environment.
        unsafe { std::env::remove_var(name) };
    }
    guard
}

fn set_env(vars: &[(&str, &str)]) {
    for (name, value) in vars {
        // SAFETY: only called while holding ENV_LOCK.
        unsafe { std::env::set_var(name, value) };
    }
}

fn remove_env(vars: &[(&str, &str)]) {
    for (name, _) in vars {
        // SAFETY: only called while holding ENV_LOCK.
        unsafe { std::env::remove_var(name) };
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config");
    file
}

fn path_of(file: &tempfile::NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

#[test]
fn test_load_from_file() {
    let _guard = lock_env();
    let file = write_config(
        r#"
[server]
port = 9191

[rate_limit]
rps = 3.5

[datastore]
type = "json"
file = "testdata/sample_ips.json"
"#,
    );

    let config = AppConfig::load(Some(&path_of(&file))).expect("config should load");
    assert_eq!(config.server.port, 9191);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.rate_limit.rps, 3.5);
    assert_eq!(config.datastore.kind, DatastoreKind::Json);
    assert_eq!(config.datastore.file, "testdata/sample_ips.json");
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_explicit_missing_file_is_error() {
    let _guard = lock_env();
    let err = AppConfig::load(Some("/no/such/config.toml")).unwrap_err();
    assert!(matches!(err, IpCountryError::Config(_)));
}

#[test]
fn test_env_overrides_file() {
    let _guard = lock_env();
    let file = write_config("[rate_limit]\nrps = 3.5\n\n[server]\nport = 9191\n");

    let vars = [("IPC__RATE_LIMIT__RPS", "42"), ("IPC__DATASTORE__TYPE", "json")];
    set_env(&vars);
    let result = AppConfig::load(Some(&path_of(&file)));
    remove_env(&vars);

    let config = result.expect("config should load");
    assert_eq!(config.rate_limit.rps, 42.0);
    assert_eq!(config.datastore.kind, DatastoreKind::Json);
    assert_eq!(config.server.port, 9191);
}

#[test]
fn test_overrides_win_and_are_validated() {
    let _guard = lock_env();
    let file = write_config("[server]\nport = 9191\n");
    let path = path_of(&file);

    let config = AppConfig::load_with_overrides(
        Some(&path),
        &ConfigOverrides {
            port: Some(7000),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(config.server.port, 7000);

    let err = AppConfig::load_with_overrides(
        Some(&path),
        &ConfigOverrides {
            rps: Some(0.0),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, IpCountryError::Config(_)));
    assert!(err.message().contains("rate_limit.rps"));
}

#[test]
fn test_invalid_log_format_rejected() {
    let _guard = lock_env();
    let file = write_config("[logging]\nformat = \"xml\"\n");

    let err = AppConfig::load_with_overrides(Some(&path_of(&file)), &ConfigOverrides::default())
        .unwrap_err();
    assert!(err.message().contains("logging.format"));
}

#[test]
fn test_legacy_env_names_are_honored() {
    let _guard = lock_env();
    let vars = [
        ("PORT", "9999"),
        ("RATE_LIMIT_RPS", "3"),
        ("DATASTORE_TYPE", "json"),
        ("DATASTORE_FILE", "testdata/sample_ips.json"),
    ];
    set_env(&vars);
    let result = AppConfig::load(None);
    remove_env(&vars);

    let config = result.expect("config should load");
    assert_eq!(config.server.port, 9999);
    assert_eq!(config.rate_limit.rps, 3.0);
    assert_eq!(config.datastore.kind, DatastoreKind::Json);
    assert_eq!(config.datastore.file, "testdata/sample_ips.json");
}

#[test]
fn test_legacy_env_ranks_below_prefixed_env_and_overrides() {
    let _guard = lock_env();
    let file = write_config("[server]\nport = 9191\n\n[rate_limit]\nrps = 1.5\n");
    let vars = [
        ("PORT", "9999"),
        ("RATE_LIMIT_RPS", "3"),
        ("IPC__RATE_LIMIT__RPS", "42"),
    ];
    set_env(&vars);
    let result = AppConfig::load_with_overrides(
        Some(&path_of(&file)),
        &ConfigOverrides {
            port: Some(7000),
            ..Default::default()
        },
    );
    remove_env(&vars);

    let config = result.expect("config should load");
    // file < legacy < IPC__* < command line
    assert_eq!(config.rate_limit.rps, 42.0);
    assert_eq!(config.server.port, 7000);
}

#[test]
fn test_legacy_env_overrides_file_and_empty_values_are_ignored() {
    let _guard = lock_env();
    let file = write_config("[server]\nport = 9191\n\n[datastore]\nfile = \"from-file.csv\"\n");
    let vars = [("PORT", "9999"), ("DATASTORE_FILE", "")];
    set_env(&vars);
    let result = AppConfig::load(Some(&path_of(&file)));
    remove_env(&vars);

    let config = result.expect("config should load");
    assert_eq!(config.server.port, 9999);
    assert_eq!(config.datastore.file, "from-file.csv");
}

#[test]
fn test_invalid_legacy_rps_is_config_error() {
    let _guard = lock_env();
    let vars = [("RATE_LIMIT_RPS", "fast")];
    set_env(&vars);
    let result = AppConfig::load(None);
    remove_env(&vars);

    assert!(matches!(result, Err(IpCountryError::Config(_))));
}
