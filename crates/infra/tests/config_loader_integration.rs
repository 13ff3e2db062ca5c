//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! building a client from it.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use captain_domain::{CaptainError, DestroyPolicy};
use captain_infra::{config, CaptainClient};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "base_url": "https://captain.example.com/api/v2",
            "password": "json-password",
            "timeout_secs": 10,
            "user_agent": "integration/1.0",
            "on_destroy": "cancel",
            "simulated_latency_ms": 20
        }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file: {:?}", result.err());

    let config = result.unwrap();
    assert_eq!(config.base_url, "https://captain.example.com/api/v2");
    assert_eq!(config.password, "json-password");
    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.user_agent, "integration/1.0");
    assert_eq!(config.on_destroy, DestroyPolicy::Cancel);
    assert_eq!(config.simulated_latency(), Some(Duration::from_millis(20)));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
base_url = "http://captain.localhost:3000/api/v2"
password = "toml-password"
on_destroy = "abandon"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("TOML config should load");
    assert_eq!(config.password, "toml-password");
    assert_eq!(config.on_destroy, DestroyPolicy::Abandon);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_loaded_config_builds_client() {
    let path = write_config(
        r#"{ "base_url": "http://captain.localhost:3000/api/v2", "on_destroy": "cancel" }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config should load");
    let client = CaptainClient::new(config).expect("client should build");

    assert_eq!(client.destroy_policy(), DestroyPolicy::Cancel);
    assert!(!client.is_logged_in());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/captain.json".into()));

    match result {
        Err(CaptainError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "base_url": "http://x" "#, "json");

    match config::load_from_file(Some(path.clone())) {
        Err(CaptainError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {:?}", other),
    }

    std::fs::remove_file(path).ok();
}
