//! Reader for FASTA files using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::parsing::{ParseError, SequenceRecord};
use crate::utils::validation::check_record_limit;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a FASTA file into one record per entry.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no records are found, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<SequenceRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    let records = if is_gzipped(path) {
        let reader = BufReader::new(MultiGzDecoder::new(file));
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))?
    } else {
        let reader = BufReader::new(file);
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))?
    };

    debug!(path = %path.display(), records = records.len(), "Read FASTA file");
    Ok(records)
}

/// Parse from a noodles FASTA reader
pub fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        records.push(SequenceRecord::new(name, record.sequence().as_ref())?);
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("test.fa")));
        assert!(is_fasta_file(Path::new("test.fasta")));
        assert!(is_fasta_file(Path::new("test.fna")));
        assert!(is_fasta_file(Path::new("test.fa.gz")));
        assert!(is_fasta_file(Path::new("test.fna.bgz")));
        assert!(is_fasta_file(Path::new("/path/to/Reference.FA")));

        assert!(!is_fasta_file(Path::new("test.txt")));
        assert!(!is_fasta_file(Path::new("test.fai")));
    }

    #[test]
    fn test_parse_fasta_file() {
        let fasta_content = b">ref1 description\nACGTACGT\nacgt\n>ref2\nGGGG\n";

        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(fasta_content).unwrap();
        temp.flush().unwrap();

        let records = parse_fasta_file(temp.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "ref1");
        assert_eq!(records[0].sequence.as_bytes(), b"ACGTACGTACGT");
        assert_eq!(records[1].name, "ref2");
        assert_eq!(records[1].sequence.len(), 4);
    }

    #[test]
    fn test_parse_gzipped_fasta() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        {
            let mut encoder = GzEncoder::new(temp.as_file_mut(), Compression::default());
            encoder.write_all(b">q\nAACG\n").unwrap();
            encoder.finish().unwrap();
        }

        let records = parse_fasta_file(temp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence.as_bytes(), b"AACG");
    }

    #[test]
    fn test_parse_empty_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        assert!(parse_fasta_file(temp.path()).is_err());
    }
}
