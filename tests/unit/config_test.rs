//! Unit tests for AppConfig loading and environment overrides.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use bookmarkhub::services::config::{AppConfig, StoreBackend, ENV_DATA_DIR, ENV_LOG, ENV_STORE};
use bookmarkhub::types::errors::ConfigError;
use tempfile::TempDir;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.backend, StoreBackend::Sqlite);
    assert_eq!(config.log_filter, "bookmarkhub=info");
    assert_eq!(config.rate_limit, 200);
    assert!(config.database_path().ends_with("bookmarkhub.db"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::from_file(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"backend": "memory", "rate_limit": 50}"#).unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert_eq!(config.backend, StoreBackend::Memory);
    assert_eq!(config.rate_limit, 50);
    assert_eq!(config.log_filter, "bookmarkhub=info");
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ backend = memory }").unwrap();

    assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_env_overrides() {
    let mut config = AppConfig::default();
    config
        .apply_env(lookup_from(&[
            (ENV_DATA_DIR, "/tmp/bookmarkhub-test"),
            (ENV_STORE, "Memory"),
            (ENV_LOG, "bookmarkhub=debug"),
        ]))
        .unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/tmp/bookmarkhub-test"));
    assert_eq!(config.backend, StoreBackend::Memory);
    assert_eq!(config.log_filter, "bookmarkhub=debug");
    assert_eq!(config.database_path(), PathBuf::from("/tmp/bookmarkhub-test/bookmarkhub.db"));
}

#[test]
fn test_blank_env_values_are_ignored() {
    let mut config = AppConfig::default();
    let before = config.clone();
    config.apply_env(lookup_from(&[(ENV_DATA_DIR, "  "), (ENV_LOG, "")])).unwrap();
    assert_eq!(config, before);
}

#[test]
fn test_unknown_backend_is_rejected() {
    let mut config = AppConfig::default();
    let result = config.apply_env(lookup_from(&[(ENV_STORE, "redis")]));
    assert!(matches!(result, Err(ConfigError::InvalidBackend(ref b)) if b == "redis"));
    assert_eq!(config.backend, StoreBackend::Sqlite);
}
