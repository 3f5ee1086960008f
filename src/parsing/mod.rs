//! Readers that turn sequence files into [`SequenceRecord`]s.
//!
//! This module provides readers for:
//!
//! - **FASTA files**: one record per entry, optionally gzip/bgzip compressed
//! - **Plain text files**: the first non-empty line is the sequence
//! - **Pair files**: first line reference, second line query
//!
//! Sequences are uppercased on input; symbols outside `ACGT` are kept as they are and
//! reported once per record at `warn` level.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ref_repeats::parsing::{read_sequences, text::parse_pair_file};
//! use std::path::Path;
//!
//! let records = read_sequences(Path::new("query.fa"), None).unwrap();
//! let (reference, query) = parse_pair_file(Path::new("test_1.txt")).unwrap();
//! ```

pub mod fasta;
pub mod text;

use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::core::sequence::Sequence;
use crate::utils::validation::{check_sequence_length, ValidationError, MAX_RECORDS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sequence file: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    SequenceTooLong(String),

    #[error("Too many records: {0} exceeds maximum allowed ({max})", max = MAX_RECORDS)]
    TooManyRecords(usize),

    #[error("Invalid content: {0}")]
    Content(#[from] ValidationError),
}

/// A named sequence read from a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub name: String,
    pub sequence: Sequence,
}

impl SequenceRecord {
    /// Build a record, uppercasing the symbols and enforcing the length limit
    ///
    /// # Errors
    ///
    /// Returns `ParseError::SequenceTooLong` if the sequence exceeds the maximum length.
    pub fn new(name: impl Into<String>, symbols: &[u8]) -> Result<Self, ParseError> {
        let name = name.into();
        if let Some(msg) = check_sequence_length(symbols.len()) {
            return Err(ParseError::SequenceTooLong(format!("{name}: {msg}")));
        }

        let sequence: Sequence = symbols
            .iter()
            .map(u8::to_ascii_uppercase)
            .collect::<Vec<u8>>()
            .into();

        let other = sequence.non_acgt_count();
        if other > 0 {
            warn!(
                record = %name,
                count = other,
                "Sequence contains symbols outside ACGT; they only match themselves"
            );
        }

        Ok(Self { name, sequence })
    }
}

/// Input file format
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Fasta,
    Text,
}

/// Guess the format from the file name; anything that is not FASTA is read as text
#[must_use]
pub fn detect_format(path: &Path) -> InputFormat {
    if fasta::is_fasta_file(path) {
        InputFormat::Fasta
    } else {
        InputFormat::Text
    }
}

/// Read every record from `path`; `-` reads plain text from stdin
///
/// # Errors
///
/// Returns a `ParseError` if the file cannot be read, or `ParseError::UnsupportedFormat` if
/// FASTA is requested for stdin.
pub fn read_sequences(
    path: &Path,
    format: Option<InputFormat>,
) -> Result<Vec<SequenceRecord>, ParseError> {
    if path.as_os_str() == "-" {
        if format == Some(InputFormat::Fasta) {
            return Err(ParseError::UnsupportedFormat(
                "stdin is read as plain text; pass a FASTA file path instead".to_string(),
            ));
        }
        let stdin = std::io::stdin();
        return Ok(vec![text::parse_text_reader(stdin.lock(), "stdin")?]);
    }

    match format.unwrap_or_else(|| detect_format(path)) {
        InputFormat::Fasta => fasta::parse_fasta_file(path),
        InputFormat::Text => Ok(vec![text::parse_text_file(path)?]),
    }
}

/// Read exactly one record from `path`
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the file holds more than one record.
pub fn read_single(path: &Path, format: Option<InputFormat>) -> Result<SequenceRecord, ParseError> {
    let mut records = read_sequences(path, format)?;
    if records.len() != 1 {
        return Err(ParseError::InvalidFormat(format!(
            "{} holds {} records, expected exactly one",
            path.display(),
            records.len()
        )));
    }
    Ok(records.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uppercases() {
        let record = SequenceRecord::new("r", b"acgtn").unwrap();
        assert_eq!(record.sequence.as_bytes(), b"ACGTN");
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("x.fa.gz")), InputFormat::Fasta);
        assert_eq!(detect_format(Path::new("x.txt")), InputFormat::Text);
        assert_eq!(detect_format(Path::new("x")), InputFormat::Text);
    }

    #[test]
    fn test_fasta_from_stdin_unsupported() {
        let err = read_sequences(Path::new("-"), Some(InputFormat::Fasta)).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_too_many_records_message_uses_limit() {
        let msg = ParseError::TooManyRecords(MAX_RECORDS).to_string();
        assert!(msg.contains(&format!("({MAX_RECORDS})")));
    }
}
