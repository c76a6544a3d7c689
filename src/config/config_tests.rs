//! Tests for config file loading

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_uses_defaults_without_warning() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config_from_path(&dir.path().join("config.toml"));

    assert!(result.warning.is_none());
    assert_eq!(result.config.submission.debounce_ms, 500);
}

#[test]
fn test_full_config_is_loaded() {
    let file = write_config(
        r#"
[backend]
url = "http://example.test:8080/api"
timeout_secs = 5

[submission]
debounce_ms = 250
stale_responses = "discard"
"#,
    );

    let result = load_config_from_path(file.path());

    assert!(result.warning.is_none());
    assert_eq!(result.config.backend.url, "http://example.test:8080/api");
    assert_eq!(result.config.backend.timeout_secs, 5);
    assert_eq!(result.config.submission.debounce_ms, 250);
    assert_eq!(
        result.config.submission.stale_responses,
        StaleResponsePolicy::Discard
    );
}

#[test]
fn test_invalid_toml_falls_back_with_warning() {
    let file = write_config("[backend\nurl = ");

    let result = load_config_from_path(file.path());

    let warning = result.warning.expect("should warn about invalid config");
    assert!(warning.contains("Invalid config"));
    assert!(warning.contains("using defaults"));
    assert_eq!(result.config.backend.url, "http://localhost:5000/api");
}

#[test]
fn test_wrong_type_falls_back_with_warning() {
    let file = write_config("[submission]\ndebounce_ms = \"fast\"\n");

    let result = load_config_from_path(file.path());

    assert!(result.warning.is_some());
    assert_eq!(result.config.submission.debounce_ms, 500);
}

#[test]
fn test_directory_path_is_read_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = load_config_from_path(dir.path());

    let warning = result.warning.expect("should warn about unreadable config");
    assert!(warning.contains("Failed to read"));
}

#[test]
fn test_config_path_ends_with_app_dir() {
    if let Some(path) = config_path() {
        assert!(path.ends_with("asanas/config.toml"));
    }
}
