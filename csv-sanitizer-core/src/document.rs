//! Raw bytes to candidate lines, and candidate lines to fields.

use std::borrow::Cow;

use encoding_rs::Encoding;
use thiserror::Error;
use tracing::{debug, warn};

/// An object body plus the encoding it was declared in.
#[derive(Debug, Clone, Copy)]
pub struct RawDocument<'a> {
    bytes: &'a [u8],
    encoding: &'static Encoding,
}

impl<'a> RawDocument<'a> {
    pub fn new(bytes: &'a [u8], encoding: &'static Encoding) -> Self {
        Self { bytes, encoding }
    }

    pub fn utf8(bytes: &'a [u8]) -> Self {
        Self::new(bytes, encoding_rs::UTF_8)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decodes the body, never failing.
    ///
    /// A leading byte-order mark is removed and, if it names a different Unicode
    /// encoding than the declared one, wins. Malformed sequences become U+FFFD.
    pub fn decode(&self) -> Cow<'a, str> {
        let (text, actual, had_errors) = self.encoding.decode(self.bytes);
        if actual != self.encoding {
            debug!(
                declared = self.encoding.name(),
                detected = actual.name(),
                "Byte-order mark overrides declared encoding"
            );
        }
        if had_errors {
            warn!(
                encoding = actual.name(),
                "Input contained undecodable bytes, replaced with U+FFFD"
            );
        }
        text
    }
}

/// Splits text into the lines that take part in parsing.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Blank and whitespace-only lines are
/// dropped, and each surviving line loses one enclosing pair of quotes.
pub fn candidate_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .flat_map(|line| line.split('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(strip_enclosing_quotes)
        .collect()
}

/// Removes a quote pair wrapping the whole line, as left behind by exporters
/// that quote entire rows.
///
/// Lines with quotes inside the pair are real CSV quoting and stay intact.
pub fn strip_enclosing_quotes(line: &str) -> &str {
    match line.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) if !inner.contains('"') => inner,
        _ => line,
    }
}

/// A line whose quoting cannot be split into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unbalanced quotes")]
pub struct MalformedLine;

/// True when a field opens with `"` and the line ends before that quote closes.
///
/// A `"` anywhere but the start of a field is a literal character.
fn has_unterminated_field(line: &str) -> bool {
    let mut chars = line.chars().peekable();
    let mut at_field_start = true;
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        match c {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            ',' => at_field_start = true,
            _ => at_field_start = false,
        }
    }
    in_quotes
}

/// Splits one line into fields on `,`, honouring `"`-quoted fields and `""` escapes.
///
/// An empty line has zero fields. Quotes inside an unquoted field are kept as text.
pub fn parse_line(line: &str) -> Result<Vec<String>, MalformedLine> {
    if has_unterminated_field(line) {
        return Err(MalformedLine);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        None => Ok(Vec::new()),
        Some(Ok(record)) => Ok(record.iter().map(str::to_string).collect()),
        Some(Err(e)) => {
            debug!(error = %e, "csv reader rejected line");
            Err(MalformedLine)
        }
    }
}
