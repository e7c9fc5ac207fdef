//! Error types for sanitizing and for whole invocations.

use thiserror::Error;

use crate::contract::StorageError;

/// Document-level failures raised while turning raw bytes into a [`crate::CleaningResult`].
///
/// Row-level problems never show up here; they are collected as rejected records.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// No line could be used as a header.
    #[error("CSV is empty or malformed")]
    EmptyOrMalformedInput,

    /// The header line parsed to zero fields.
    #[error("Invalid header, expected at least one field")]
    InvalidHeader,

    /// Writing the cleaned document failed.
    #[error("failed to serialize cleaned CSV: {0}")]
    Serialize(#[from] csv::Error),

    /// Flushing the in-memory writer failed.
    #[error("failed to flush cleaned CSV: {0}")]
    Flush(#[from] std::io::Error),
}

/// A [`crate::SanitizerConfig`] that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyPrefix(&'static str),

    /// Cleaned output would land back in the intake area.
    #[error("intake_prefix and output_prefix must differ (both are {0:?})")]
    SamePrefix(String),

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),
}

/// Everything that can end an invocation early.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// Key is outside the intake prefix; nothing is read.
    #[error("File {key} is not in {prefix} folder")]
    NotInExpectedLocation { key: String, prefix: String },

    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    /// Notification payload could not be understood.
    #[error("invalid event notification: {0}")]
    Event(String),

    #[error("invalid sanitizer configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read s3://{bucket}/{key}: {source}")]
    Read {
        bucket: String,
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("failed to write s3://{bucket}/{key}: {source}")]
    Write {
        bucket: String,
        key: String,
        #[source]
        source: StorageError,
    },
}

/// Caller-visible failure classes of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotInExpectedLocation,
    EmptyOrMalformedInput,
    InvalidHeader,
    UnexpectedFailure,
}

impl FailureKind {
    pub fn status_code(self) -> u16 {
        match self {
            FailureKind::NotInExpectedLocation
            | FailureKind::EmptyOrMalformedInput
            | FailureKind::InvalidHeader => 400,
            FailureKind::UnexpectedFailure => 500,
        }
    }
}

impl InvocationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            InvocationError::NotInExpectedLocation { .. } => FailureKind::NotInExpectedLocation,
            InvocationError::Sanitize(SanitizeError::EmptyOrMalformedInput) => {
                FailureKind::EmptyOrMalformedInput
            }
            InvocationError::Sanitize(SanitizeError::InvalidHeader) => FailureKind::InvalidHeader,
            InvocationError::Sanitize(_)
            | InvocationError::Event(_)
            | InvocationError::Config(_)
            | InvocationError::Read { .. }
            | InvocationError::Write { .. } => FailureKind::UnexpectedFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InvocationError::NotInExpectedLocation {
            key: "processed/file.csv".to_string(),
            prefix: "raw/".to_string(),
        };
        assert_eq!(err.to_string(), "File processed/file.csv is not in raw/ folder");
    }

    #[test]
    fn test_kind_maps_to_status_code() {
        let cases: Vec<(InvocationError, u16)> = vec![
            (
                InvocationError::NotInExpectedLocation {
                    key: "x".into(),
                    prefix: "raw/".into(),
                },
                400,
            ),
            (SanitizeError::EmptyOrMalformedInput.into(), 400),
            (SanitizeError::InvalidHeader.into(), 400),
            (InvocationError::Event("no records".into()), 500),
            (ConfigError::SamePrefix("raw/".into()).into(), 500),
            (
                InvocationError::Read {
                    bucket: "b".into(),
                    key: "raw/a.csv".into(),
                    source: "boom".into(),
                },
                500,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.kind().status_code(), expected, "{err}");
        }
    }
}
