//! Invocation entrypoint: one object-created event in, one status out.
//!
//! This module ties the sanitizer to an [`ObjectStore`]. For a single object it
//!   - checks the key against the intake prefix (nothing is read otherwise)
//!   - reads the raw body
//!   - sanitizes it into cleaned rows and rejected rows
//!   - writes the cleaned CSV next to the intake area, under the output prefix
//!   - writes an error log when at least one row was rejected
//!
//! # Major Types
//! - [`InvocationResult`]: the caller-visible `{statusCode, body}` pair
//! - [`ProcessedObject`]: what a successful run produced, for logging and tests
//!
//! # Error Handling
//! Steps run in order and stop at the first failure. [`process_object`] returns the
//! failure as an [`InvocationError`]; [`handle_object`] and [`handle_notification`]
//! always turn it into an [`InvocationResult`] so callers never see an `Err`.
//! Document-level failures happen before any write.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::SanitizerConfig;
use crate::contract::ObjectStore;
use crate::error::InvocationError;
use crate::event::StorageEvent;
use crate::keys::ObjectKeys;
use crate::sanitize::Sanitizer;

/// Status returned to whoever triggered the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResult {
    pub fn success(cleaned_key: &str) -> Self {
        Self {
            status_code: 200,
            body: format!("Cleaned CSV saved to {cleaned_key}"),
        }
    }

    pub fn from_error(err: &InvocationError) -> Self {
        Self {
            status_code: err.kind().status_code(),
            body: format!("Error: {err}"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

impl From<Result<ProcessedObject, InvocationError>> for InvocationResult {
    fn from(outcome: Result<ProcessedObject, InvocationError>) -> Self {
        match outcome {
            Ok(processed) => Self::success(&processed.keys.cleaned),
            Err(e) => Self::from_error(&e),
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedObject {
    pub bucket: String,
    pub keys: ObjectKeys,
    pub cleaned_rows: usize,
    pub rejected_rows: usize,
    pub log_written: bool,
}

/// Runs every step for one object and reports the first failure.
pub async fn process_object<S>(
    config: &SanitizerConfig,
    store: &S,
    bucket: &str,
    key: &str,
) -> Result<ProcessedObject, InvocationError>
where
    S: ObjectStore + ?Sized,
{
    info!(bucket, key, "[INVOKE] Processing file: s3://{}/{}", bucket, key);

    config.validate()?;
    let keys = ObjectKeys::resolve(config, key)?;
    let sanitizer = Sanitizer::from_config(config)?;

    let raw = store
        .get_object(bucket, key)
        .await
        .map_err(|source| InvocationError::Read {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source,
        })?;
    info!(bucket, key, size = raw.len(), "[INVOKE] Read raw object");

    let result = sanitizer.sanitize(&raw, key)?;
    let cleaned = result.to_csv()?;

    info!(bucket, key = %keys.cleaned, "[INVOKE] Output path: s3://{}/{}", bucket, keys.cleaned);
    store
        .put_object(bucket, &keys.cleaned, cleaned)
        .await
        .map_err(|source| InvocationError::Write {
            bucket: bucket.to_string(),
            key: keys.cleaned.clone(),
            source,
        })?;
    info!(bucket, key = %keys.cleaned, "[INVOKE] Cleaned CSV saved");

    let log_written = match result.error_log() {
        Some(log) => {
            store
                .put_object(bucket, &keys.log, log)
                .await
                .map_err(|source| InvocationError::Write {
                    bucket: bucket.to_string(),
                    key: keys.log.clone(),
                    source,
                })?;
            info!(
                bucket,
                key = %keys.log,
                rejected = result.rejected.len(),
                "[INVOKE] Error log saved"
            );
            true
        }
        None => false,
    };

    Ok(ProcessedObject {
        bucket: bucket.to_string(),
        keys,
        cleaned_rows: result.cleaned.len(),
        rejected_rows: result.rejected.len(),
        log_written,
    })
}

/// Processes one object and converts the outcome into a status.
pub async fn handle_object<S>(
    config: &SanitizerConfig,
    store: &S,
    bucket: &str,
    key: &str,
) -> InvocationResult
where
    S: ObjectStore + ?Sized,
{
    let outcome = process_object(config, store, bucket, key).await;
    match &outcome {
        Ok(processed) => info!(
            bucket,
            key,
            cleaned_rows = processed.cleaned_rows,
            rejected_rows = processed.rejected_rows,
            "[INVOKE] Completed"
        ),
        Err(e) => error!(
            bucket,
            key,
            error = %e,
            kind = ?e.kind(),
            "[INVOKE][ERROR] Error processing file"
        ),
    }
    outcome.into()
}

/// Parses a notification payload and processes the object of its first record.
pub async fn handle_notification<S>(
    config: &SanitizerConfig,
    store: &S,
    payload: &[u8],
) -> InvocationResult
where
    S: ObjectStore + ?Sized,
{
    let event = match StorageEvent::from_slice(payload) {
        Ok(event) => event,
        Err(e) => {
            error!(error = %e, "[INVOKE][ERROR] Could not parse event notification");
            return InvocationResult::from_error(&e);
        }
    };
    match event.target() {
        Ok((bucket, key)) => handle_object(config, store, bucket, key).await,
        Err(e) => {
            error!(error = %e, "[INVOKE][ERROR] Event notification has no target object");
            InvocationResult::from_error(&e)
        }
    }
}
