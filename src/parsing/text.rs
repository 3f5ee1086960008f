use std::io::{BufRead, Read};
use std::path::Path;

use crate::parsing::{ParseError, SequenceRecord};
use crate::utils::validation::validate_text_content;

fn record_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "sequence".to_string())
}

/// Non-empty lines with surrounding whitespace removed
fn sequence_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Parse a plain text file whose first non-empty line is the sequence
///
/// A file with no sequence line yields an empty record.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or `ParseError::Content` if it is
/// binary.
pub fn parse_text_file(path: &Path) -> Result<SequenceRecord, ParseError> {
    let content = std::fs::read(path)?;
    validate_text_content(&content)?;
    parse_text(&String::from_utf8_lossy(&content), &record_name(path))
}

/// Parse a sequence from any buffered reader (e.g. stdin)
///
/// # Errors
///
/// Returns `ParseError::Io` on read failure.
pub fn parse_text_reader<R: BufRead>(
    mut reader: R,
    name: &str,
) -> Result<SequenceRecord, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_text(&text, name)
}

/// Parse a sequence from raw text; no sequence line means an empty sequence
///
/// # Errors
///
/// Returns `ParseError::SequenceTooLong` if the line exceeds the maximum length.
pub fn parse_text(text: &str, name: &str) -> Result<SequenceRecord, ParseError> {
    let line = sequence_lines(text).next().unwrap_or_default();
    SequenceRecord::new(name, line.as_bytes())
}

/// Parse a pair file: line 1 is the reference, line 2 is the query
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or `ParseError::Content` if it is
/// binary.
pub fn parse_pair_file(path: &Path) -> Result<(SequenceRecord, SequenceRecord), ParseError> {
    let content = std::fs::read(path)?;
    validate_text_content(&content)?;
    parse_pair(&String::from_utf8_lossy(&content))
}

/// Parse reference and query from the first two lines of raw text
///
/// Lines are taken by position, so a blank or missing line is an empty sequence.
///
/// # Errors
///
/// Returns `ParseError::SequenceTooLong` if either line exceeds the maximum length.
pub fn parse_pair(text: &str) -> Result<(SequenceRecord, SequenceRecord), ParseError> {
    let mut lines = text.lines().map(str::trim);
    let reference = lines.next().unwrap_or_default();
    let query = lines.next().unwrap_or_default();
    Ok((
        SequenceRecord::new("reference", reference.as_bytes())?,
        SequenceRecord::new("query", query.as_bytes())?,
    ))
}
