//! Centralized limits and validation helpers.

/// Longest reference the substring index is built for when the strategy is `auto`.
///
/// The substring index stores every substring of the reference and of its reverse
/// complement, so its memory grows with the cube of the length.
pub const DEFAULT_SUBSTRING_INDEX_LIMIT: usize = 512;

/// Maximum number of symbols accepted for a single sequence (DOS protection)
pub const MAX_SEQUENCE_LENGTH: usize = 50_000_000;

/// Maximum number of records accepted from a single file
pub const MAX_RECORDS: usize = 100_000;

/// Check a sequence length against [`MAX_SEQUENCE_LENGTH`].
///
/// Returns an error message if the length exceeds the limit, None if it is acceptable.
#[must_use]
pub fn check_sequence_length(len: usize) -> Option<String> {
    if len > MAX_SEQUENCE_LENGTH {
        Some(format!(
            "Sequence of {len} symbols exceeds maximum of {MAX_SEQUENCE_LENGTH}"
        ))
    } else {
        None
    }
}

/// Check if adding another record would exceed [`MAX_RECORDS`].
///
/// Call this with the current count BEFORE adding a new record.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// MD5 digest of a sequence, lowercase hex.
///
/// # Examples
///
/// ```
/// use ref_repeats::utils::validation::sequence_digest;
///
/// assert_eq!(sequence_digest(b"ACGT"), "f1f8f4bf413b16ad135722aa4591043e");
/// ```
#[must_use]
pub fn sequence_digest(seq: &[u8]) -> String {
    format!("{:x}", md5::compute(seq))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File content appears to be binary, expected plain text sequence")]
    Binary,
}

/// Reject content that is clearly not a plain text sequence file.
///
/// # Errors
///
/// Returns `ValidationError::Binary` if more than 5% of a non-trivial file is non-printable or
/// it is not valid UTF-8. Empty content is a valid, empty sequence.
pub fn validate_text_content(content: &[u8]) -> Result<(), ValidationError> {
    let non_printable_count = content
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32) || b > 126)
        .count();
    if content.len() > 100 && non_printable_count > content.len() / 20 {
        return Err(ValidationError::Binary);
    }

    if std::str::from_utf8(content).is_err() {
        return Err(ValidationError::Binary);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_sequence_length() {
        assert!(check_sequence_length(0).is_none());
        assert!(check_sequence_length(MAX_SEQUENCE_LENGTH).is_none());
        assert!(check_sequence_length(MAX_SEQUENCE_LENGTH + 1).is_some());
    }

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(MAX_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_RECORDS).is_some());
    }

    #[test]
    fn test_sequence_digest_is_case_sensitive() {
        assert_eq!(sequence_digest(b"ACGT"), "f1f8f4bf413b16ad135722aa4591043e");
        assert_ne!(sequence_digest(b"acgt"), sequence_digest(b"ACGT"));
    }

    #[test]
    fn test_validate_text_content() {
        assert!(validate_text_content(b"").is_ok());
        assert!(validate_text_content(b"ACGT\nACGT\n").is_ok());

        let binary = vec![0u8; 200];
        assert_eq!(validate_text_content(&binary), Err(ValidationError::Binary));
    }
}
