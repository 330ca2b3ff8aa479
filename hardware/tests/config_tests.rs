//! Integration tests for configuration loading.

use std::path::Path;

use pipeline_tracker::common::Error;
use pipeline_tracker::config::Config;

/// Tests that an empty document yields the defaults.
#[test]
fn test_empty_config_defaults() {
    let config = Config::from_toml("").unwrap();
    assert!(config.general.trace_cycles);
    assert_eq!(config.general.log_level, "info");
    assert!(!config.display.legacy_bubble_name);
    assert!(config.display.show_stats);
}

/// Tests overriding individual fields.
#[test]
fn test_partial_override() {
    let config = Config::from_toml(
        r#"
        [general]
        log_level = "debug"

        [display]
        legacy_bubble_name = true
        "#,
    )
    .unwrap();

    assert_eq!(config.general.log_level, "debug");
    assert!(config.general.trace_cycles);
    assert!(config.display.legacy_bubble_name);
    assert!(config.display.show_stats);
}

/// Tests that a type mismatch is reported as a parse error.
#[test]
fn test_invalid_config() {
    let err = Config::from_toml("[general]\ntrace_cycles = \"yes\"").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.to_string().contains("<inline>"));
}

/// Tests loading the shipped default configuration.
#[test]
fn test_default_config_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/default.toml");
    let config = Config::from_file(path).unwrap();
    assert_eq!(config.general.log_level, "info");
    assert!(config.display.show_stats);
}

/// Tests that a missing file is reported as an I/O error.
#[test]
fn test_missing_config_file() {
    let err = Config::from_file("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("does/not/exist.toml"));
}

/// Tests that an explicitly named config must exist.
#[test]
fn test_load_explicit_missing_path_fails() {
    let err = Config::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

/// Tests loading an explicit config path and the implicit fallback.
#[test]
fn test_load_explicit_and_implicit() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/default.toml");
    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.general.log_level, "info");

    let config = Config::load(None).unwrap();
    assert!(config.display.show_stats);
}
