/// `load_config` module: Loads a static YAML config and merges environment overrides into a [`CliConfig`].
///
/// This is the only place where user-supplied YAML is parsed and mapped to the
/// strongly-typed configuration used by the CLI.
///
/// # Responsibilities
/// - Parse the YAML file into intermediate structs
/// - Fill in sanitizer defaults for anything the file leaves out
/// - Let `CSV_SANITIZER_STORAGE_ROOT` override `storage.root`
/// - Validate the merged result so bad prefixes or encodings fail before any object is touched
///
/// # Errors
/// All errors use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::{Context, Result};
use csv_sanitizer_core::SanitizerConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Overrides `storage.root` when set.
pub const STORAGE_ROOT_ENV: &str = "CSV_SANITIZER_STORAGE_ROOT";

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding one subdirectory per bucket.
    pub storage_root: PathBuf,
    pub sanitizer: SanitizerConfig,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    storage: Option<StorageSection>,
    #[serde(default)]
    sanitizer: SanitizerConfig,
}

#[derive(Debug, Deserialize)]
struct StorageSection {
    root: PathBuf,
}

/// Loads the YAML config at `path` and applies environment overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let storage_root = match std::env::var(STORAGE_ROOT_ENV) {
        Ok(root) if !root.trim().is_empty() => {
            info!(storage_root = %root, "{} found in env, overriding storage.root", STORAGE_ROOT_ENV);
            PathBuf::from(root)
        }
        _ => match raw.storage {
            Some(storage) => storage.root,
            None => {
                error!("No storage root configured");
                anyhow::bail!(
                    "storage.root missing from config and {} not set",
                    STORAGE_ROOT_ENV
                );
            }
        },
    };

    raw.sanitizer
        .validate()
        .context("Invalid sanitizer section")?;
    raw.sanitizer.trace_loaded();

    info!(
        storage_root = %storage_root.display(),
        "Config loaded and merged successfully"
    );

    Ok(CliConfig {
        storage_root,
        sanitizer: raw.sanitizer,
    })
}
