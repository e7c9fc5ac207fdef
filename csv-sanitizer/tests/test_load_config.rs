use csv_sanitizer::load_config::{load_config, STORAGE_ROOT_ENV};
use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn config_file(yaml: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), yaml).unwrap();
    config_file
}

/// A full config file maps onto the storage root and sanitizer section.
#[test]
#[serial]
fn test_load_config_reads_all_sections() {
    env::remove_var(STORAGE_ROOT_ENV);
    let file = config_file(
        r#"
storage:
  root: ./tmp/objects
sanitizer:
  intake_prefix: incoming/
  output_prefix: clean/
  log_prefix: audit/
  encoding: windows-1252
"#,
    );

    let config = load_config(file.path()).expect("Config should load");

    assert_eq!(config.storage_root, PathBuf::from("./tmp/objects"));
    assert_eq!(config.sanitizer.intake_prefix, "incoming/");
    assert_eq!(config.sanitizer.output_prefix, "clean/");
    assert_eq!(config.sanitizer.log_prefix, "audit/");
    assert_eq!(config.sanitizer.encoding, "windows-1252");
}

/// Omitting the sanitizer section keeps the raw/cleaned/logs defaults.
#[test]
#[serial]
fn test_load_config_defaults_sanitizer_section() {
    env::remove_var(STORAGE_ROOT_ENV);
    let file = config_file("storage:\n  root: /data/buckets\n");

    let config = load_config(file.path()).expect("Config should load");

    assert_eq!(config.sanitizer.intake_prefix, "raw/");
    assert_eq!(config.sanitizer.output_prefix, "cleaned/");
    assert_eq!(config.sanitizer.log_prefix, "logs/");
}

/// The environment variable wins over the file, and may replace it entirely.
#[test]
#[serial]
fn test_load_config_env_overrides_storage_root() {
    env::set_var(STORAGE_ROOT_ENV, "/mnt/override");
    let with_storage = config_file("storage:\n  root: /data/buckets\n");
    let without_storage = config_file("sanitizer:\n  log_prefix: errors/\n");

    let first = load_config(with_storage.path()).expect("Config should load");
    let second = load_config(without_storage.path()).expect("Config should load");
    env::remove_var(STORAGE_ROOT_ENV);

    assert_eq!(first.storage_root, PathBuf::from("/mnt/override"));
    assert_eq!(second.storage_root, PathBuf::from("/mnt/override"));
    assert_eq!(second.sanitizer.log_prefix, "errors/");
}

#[test]
#[serial]
fn test_load_config_errors_without_storage_root() {
    env::remove_var(STORAGE_ROOT_ENV);
    let file = config_file("sanitizer:\n  intake_prefix: raw/\n");

    let msg = load_config(file.path()).unwrap_err().to_string();
    assert!(msg.contains(STORAGE_ROOT_ENV), "got: {msg}");
}

#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    env::remove_var(STORAGE_ROOT_ENV);
    let file = config_file("not-yaml: [:::");

    let msg = load_config(file.path()).unwrap_err().to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
#[serial]
fn test_load_config_rejects_invalid_sanitizer_section() {
    env::remove_var(STORAGE_ROOT_ENV);
    let file = config_file(
        "storage:\n  root: /data\nsanitizer:\n  intake_prefix: same/\n  output_prefix: same/\n",
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(
        format!("{err:#}").contains("must differ"),
        "got: {err:#}"
    );
}
