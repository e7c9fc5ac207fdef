//! Row validation and cleaning.
//!
//! A run turns raw bytes into a [`CleaningResult`]: the header, the rows that passed
//! every rule, and the rows that did not together with the reason. Row-level problems
//! never fail the run; only a missing or empty header does.
//!
//! # Rules
//! Each body row gets exactly one outcome, checked in this order:
//! 1. a quoted field never closes: [`RejectionReason::MalformedLine`]
//! 2. field count differs from the header: [`RejectionReason::WrongColumnCount`]
//! 3. every field blank: [`RejectionReason::EmptyRow`]
//! 4. some fields blank: [`RejectionReason::MissingFields`]
//! 5. otherwise the row is kept verbatim.

use std::fmt;

use encoding_rs::Encoding;
use tracing::{debug, error, info};

use crate::config::SanitizerConfig;
use crate::document::{candidate_lines, parse_line, RawDocument};
use crate::error::{ConfigError, SanitizeError};

/// Ordered field names from the first candidate line.
pub type Header = Vec<String>;

/// Ordered field values of one body row.
pub type Record = Vec<String>;

/// Why a row was diverted to the error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    MalformedLine,
    WrongColumnCount,
    EmptyRow,
    MissingFields,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RejectionReason::MalformedLine => "malformed line",
            RejectionReason::WrongColumnCount => "wrong column count",
            RejectionReason::EmptyRow => "empty/comma-only row",
            RejectionReason::MissingFields => "missing/null fields",
        };
        f.write_str(reason)
    }
}

/// A row that failed a rule, with its original values.
///
/// Malformed lines carry the raw line as their single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub reason: RejectionReason,
    pub values: Vec<String>,
}

impl RejectedRecord {
    /// One line of the error log.
    pub fn log_line(&self) -> String {
        format!("Skipped row ({}): {:?}", self.reason, self.values)
    }
}

/// Output of one sanitizer run. Both buckets keep input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningResult {
    pub header: Header,
    pub cleaned: Vec<Record>,
    pub rejected: Vec<RejectedRecord>,
}

impl CleaningResult {
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }

    /// Header plus cleaned rows, `\n`-terminated, quoting only where needed.
    pub fn to_csv(&self) -> Result<Vec<u8>, SanitizeError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());

        writer.write_record(&self.header)?;
        for record in &self.cleaned {
            writer.write_record(record)?;
        }

        writer
            .into_inner()
            .map_err(|e| SanitizeError::Flush(e.into_error()))
    }

    /// Newline-joined rejection lines, or `None` when nothing was rejected.
    pub fn error_log(&self) -> Option<Vec<u8>> {
        if self.rejected.is_empty() {
            return None;
        }
        let log = self
            .rejected
            .iter()
            .map(RejectedRecord::log_line)
            .collect::<Vec<_>>()
            .join("\n");
        Some(log.into_bytes())
    }
}

/// Applies the row rules to an already split row.
pub fn classify(header_len: usize, fields: &[String]) -> Option<RejectionReason> {
    if fields.len() != header_len {
        return Some(RejectionReason::WrongColumnCount);
    }
    let blank = fields.iter().filter(|f| f.trim().is_empty()).count();
    if blank == fields.len() {
        Some(RejectionReason::EmptyRow)
    } else if blank > 0 {
        Some(RejectionReason::MissingFields)
    } else {
        None
    }
}

/// Stateless cleaner bound to a declared input encoding.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer {
    encoding: &'static Encoding,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(encoding_rs::UTF_8)
    }
}

impl Sanitizer {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    pub fn from_config(config: &SanitizerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.input_encoding()?))
    }

    /// Cleans one document. `source` is only used for diagnostics.
    pub fn sanitize(&self, bytes: &[u8], source: &str) -> Result<CleaningResult, SanitizeError> {
        let raw = RawDocument::new(bytes, self.encoding);
        let text = raw.decode();
        info!(source, size = raw.len(), "Decoded raw document");

        let mut lines = candidate_lines(&text).into_iter();

        let header_line = lines.next().ok_or_else(|| {
            error!(source, "CSV is empty or malformed");
            SanitizeError::EmptyOrMalformedInput
        })?;
        let header = parse_line(header_line).map_err(|e| {
            error!(source, line = header_line, error = %e, "Header line could not be parsed");
            SanitizeError::EmptyOrMalformedInput
        })?;
        if header.is_empty() {
            error!(source, "Invalid header, expected at least one field");
            return Err(SanitizeError::InvalidHeader);
        }
        info!(source, ?header, "Header");

        let mut cleaned = Vec::new();
        let mut rejected = Vec::new();

        for line in lines {
            let fields = match parse_line(line) {
                Ok(fields) => fields,
                Err(e) => {
                    debug!(source, line, error = %e, "Rejected malformed line");
                    rejected.push(RejectedRecord {
                        reason: RejectionReason::MalformedLine,
                        values: vec![line.to_string()],
                    });
                    continue;
                }
            };
            match classify(header.len(), &fields) {
                Some(reason) => {
                    debug!(source, ?fields, %reason, "Rejected row");
                    rejected.push(RejectedRecord {
                        reason,
                        values: fields,
                    });
                }
                None => {
                    debug!(source, ?fields, "Kept row");
                    cleaned.push(fields);
                }
            }
        }

        info!(
            source,
            cleaned = cleaned.len(),
            rejected = rejected.len(),
            "Sanitized document"
        );
        Ok(CleaningResult {
            header,
            cleaned,
            rejected,
        })
    }
}
