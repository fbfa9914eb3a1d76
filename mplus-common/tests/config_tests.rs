//! Integration tests for TOML configuration loading
//!
//! Tests cover:
//! - Explicit config file must exist and parse
//! - Unknown keys are rejected
//! - File values feed resolution below CLI/env overrides

use mplus_common::config::{
    load_toml_config, locate_toml_config, resolve_config, ConfigOverrides, TomlConfig,
};
use mplus_common::Error;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("Should write config file");
    path
}

#[test]
fn test_load_full_toml_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
api_base_url = "http://127.0.0.1:9100/api/v1"
access_key = "secret-key"
default_season = "season-tww-1"
current_season = "season-tww-3"
request_timeout_secs = 5
detail_timeout_secs = 2
bind_address = "0.0.0.0:8080"
"#,
    );

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.access_key.as_deref(), Some("secret-key"));
    assert_eq!(config.detail_timeout_secs, Some(2));

    let resolved = resolve_config(&ConfigOverrides::default(), Some(&config)).unwrap();
    assert_eq!(resolved.api_base_url, "http://127.0.0.1:9100/api/v1");
    assert_eq!(resolved.access_key(), Some("secret-key"));
    assert_eq!(resolved.default_season, "season-tww-1");
    assert_eq!(resolved.current_season, "season-tww-3");
    assert_eq!(resolved.request_timeout_secs, 5);
    assert_eq!(resolved.bind_address, "0.0.0.0:8080");
}

#[test]
fn test_partial_toml_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "current_season = \"season-tww-3\"\n");

    let config = load_toml_config(&path).unwrap();
    assert_eq!(
        config,
        TomlConfig {
            current_season: Some("season-tww-3".to_string()),
            ..TomlConfig::default()
        }
    );

    let resolved = resolve_config(&ConfigOverrides::default(), Some(&config)).unwrap();
    assert_eq!(resolved.current_season, "season-tww-3");
    assert_eq!(resolved.default_season, mplus_common::config::DEFAULT_SEASON);
}

#[test]
fn test_unknown_key_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "root_folder = \"/music\"\n");

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = locate_toml_config(Some(&missing));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_explicit_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "request_timeout_secs = 12\n");

    let config = locate_toml_config(Some(&path)).unwrap().expect("Should load file");
    assert_eq!(config.request_timeout_secs, Some(12));
}

#[test]
fn test_override_wins_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "access_key = \"from-file\"\n");
    let file = load_toml_config(&path).unwrap();

    let overrides = ConfigOverrides {
        access_key: Some("from-cli".to_string()),
        ..ConfigOverrides::default()
    };
    let resolved = resolve_config(&overrides, Some(&file)).unwrap();
    assert_eq!(resolved.access_key(), Some("from-cli"));
}
