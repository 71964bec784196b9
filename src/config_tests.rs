//! Tests for config loading

use super::*;
use std::io::Write;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.suggestions.threshold, DEFAULT_REFRESH_THRESHOLD);
}

#[test]
fn test_valid_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[suggestions]\nthreshold = 42\n");

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.suggestions.threshold, 42);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[suggestions\nthreshold = ");

    let result = load_config_from_path(&path);
    assert!(matches!(result, Err(DraftError::InvalidConfig { .. })));
}

#[test]
fn test_load_config_malformed_falls_back_with_warning() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "threshold = [");

    let result = load_config(Some(&path));
    assert!(result.warning.is_some());
    assert!(result.warning.unwrap().contains("Invalid config file"));
    assert_eq!(result.config.suggestions.threshold, DEFAULT_REFRESH_THRESHOLD);
}

#[test]
fn test_load_config_valid_has_no_warning() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[ai]\nenabled = false\n");

    let result = load_config(Some(&path));
    assert!(result.warning.is_none());
    assert!(!result.config.ai.enabled);
}

#[test]
fn test_configured_api_key_is_not_overridden() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[ai.anthropic]\napi_key = \"from-file\"\n");

    let result = load_config(Some(&path));
    assert_eq!(
        result.config.ai.anthropic.api_key.as_deref(),
        Some("from-file")
    );
}
