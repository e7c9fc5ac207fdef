//! Object key conventions for intake, cleaned output and error logs.

use crate::config::SanitizerConfig;
use crate::error::InvocationError;

/// Keys touched by one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKeys {
    pub source: String,
    pub cleaned: String,
    pub log: String,
}

impl ObjectKeys {
    /// Derives output keys for `key`, refusing keys outside the intake prefix.
    pub fn resolve(config: &SanitizerConfig, key: &str) -> Result<Self, InvocationError> {
        let rest = key.strip_prefix(config.intake_prefix.as_str()).ok_or_else(|| {
            InvocationError::NotInExpectedLocation {
                key: key.to_string(),
                prefix: config.intake_prefix.clone(),
            }
        })?;

        Ok(Self {
            source: key.to_string(),
            cleaned: format!("{}{}", config.output_prefix, rest),
            log: log_key(&config.log_prefix, key),
        })
    }
}

/// `<log_prefix><basename without .csv>_errors.log`
pub fn log_key(log_prefix: &str, key: &str) -> String {
    let basename = key.rsplit('/').next().unwrap_or(key);
    let stem = basename.strip_suffix(".csv").unwrap_or(basename);
    format!("{log_prefix}{stem}_errors.log")
}
