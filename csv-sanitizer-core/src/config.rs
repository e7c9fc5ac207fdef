use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

pub const DEFAULT_INTAKE_PREFIX: &str = "raw/";
pub const DEFAULT_OUTPUT_PREFIX: &str = "cleaned/";
pub const DEFAULT_LOG_PREFIX: &str = "logs/";
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Path conventions and input encoding for one sanitizer deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Keys must start with this to be processed.
    pub intake_prefix: String,
    /// Replaces the intake prefix in the cleaned object's key.
    pub output_prefix: String,
    /// Directory-like prefix for error logs.
    pub log_prefix: String,
    /// WHATWG label of the declared input encoding.
    pub encoding: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            intake_prefix: DEFAULT_INTAKE_PREFIX.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl SanitizerConfig {
    /// Resolve the configured encoding label.
    pub fn input_encoding(&self) -> Result<&'static Encoding, ConfigError> {
        Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(self.encoding.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.intake_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix("intake_prefix"));
        }
        if self.output_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix("output_prefix"));
        }
        // Cleaned output would land back in the intake area and retrigger.
        if self.intake_prefix == self.output_prefix {
            return Err(ConfigError::SamePrefix(self.intake_prefix.clone()));
        }
        self.input_encoding()?;
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(
            intake_prefix = %self.intake_prefix,
            output_prefix = %self.output_prefix,
            log_prefix = %self.log_prefix,
            encoding = %self.encoding,
            "Loaded SanitizerConfig"
        );
        debug!(?self, "SanitizerConfig loaded (full debug)");
    }
}
