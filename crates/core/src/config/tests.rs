//! Tests for configuration module

use super::*;
use crate::error::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.generation.suffix, "sirish");
    assert!(config.generation.format_imports);
    assert!(config.generation.create_tx);
    assert_eq!(config.generation.formatter_command, "goimports");
    assert!(config.show_banner);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        show_banner = false

        [generation]
        suffix = "trace"
        create_tx = false
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert!(!config.show_banner);
    assert_eq!(config.generation.suffix, "trace");
    assert!(!config.generation.create_tx);
    assert!(config.generation.format_imports);
}

#[test]
fn test_from_toml_str_empty_uses_defaults() {
    let config = Config::from_toml_str("").expect("Failed to parse empty TOML");
    assert_eq!(config, Config::default());
}

#[test]
fn test_from_toml_str_invalid() {
    let result = Config::from_toml_str("[generation\nsuffix = 1");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_from_file_reads_values() {
    let file = create_temp_config_file(
        r#"
        [generation]
        suffix = "apm"
        formatter_command = "/usr/local/bin/goimports"
        "#,
    )
    .expect("temp config");

    let config = Config::from_file(file.path()).expect("Failed to load config");
    assert_eq!(config.generation.suffix, "apm");
    assert_eq!(
        config.generation.formatter_command,
        "/usr/local/bin/goimports"
    );
    assert!(config.show_banner);
}

#[test]
fn test_from_file_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config =
        Config::from_file(&dir.path().join("absent.toml")).expect("Failed to load defaults");
    assert_eq!(config.generation.suffix, "sirish");
    assert!(config.generation.create_tx);
}

#[test]
fn test_validate_rejects_empty_suffix() {
    let mut config = Config::default();
    config.generation.suffix = String::new();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("must not be empty"));
}

#[test]
fn test_validate_rejects_path_like_suffix() {
    let mut config = Config::default();
    for suffix in ["a/b", "a.b", "1trace"] {
        config.generation.suffix = suffix.to_string();
        assert!(config.validate().is_err(), "suffix {suffix} should be rejected");
    }
}

#[test]
fn test_validate_requires_formatter_when_formatting() {
    let mut config = Config::default();
    config.generation.formatter_command = "  ".to_string();
    assert!(config.validate().is_err());

    config.generation.format_imports = false;
    assert!(config.validate().is_ok());
}

#[test]
fn test_file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sirish.toml");
    std::fs::write(&path, "[generation]\nsuffix = \"otel\"\n").expect("write config");

    let loaded = Config::from_file(&path).expect("load config");
    assert_eq!(loaded.generation.suffix, "otel");
    assert!(loaded.generation.format_imports);
}
