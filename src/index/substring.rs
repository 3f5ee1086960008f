use std::collections::HashMap;

use tracing::debug;

use crate::core::sequence::reverse_complement;
use crate::core::types::Orientation;

use super::{IndexEntry, IndexError, SegmentSource};

/// Map from every substring of the reference (and of its reverse complement) to one entry.
///
/// Construction enumerates O(n^2) substrings of average length O(n), so memory grows
/// cubically. Callers pick the automaton path above [`crate::utils::validation::DEFAULT_SUBSTRING_INDEX_LIMIT`].
#[derive(Debug, Default)]
pub struct SubstringIndex {
    entries: HashMap<Vec<u8>, IndexEntry>,
    reference_len: usize,
}

impl SubstringIndex {
    /// Build the index with no size check.
    ///
    /// Forward substrings are inserted first, for increasing start and then increasing end,
    /// overwriting any previous entry. Reverse-complement substrings are then inserted in the
    /// same order over the reverse-complement string, only where no entry exists yet.
    #[must_use]
    pub fn build(reference: &[u8]) -> Self {
        let n = reference.len();
        let mut entries: HashMap<Vec<u8>, IndexEntry> = HashMap::new();

        for i in 0..n {
            let entry = IndexEntry::new(i, Orientation::Forward);
            for j in i..n {
                let key = &reference[i..=j];
                match entries.get_mut(key) {
                    Some(existing) => *existing = entry,
                    None => {
                        entries.insert(key.to_vec(), entry);
                    }
                }
            }
        }
        let forward_keys = entries.len();

        let rc = reverse_complement(reference);
        for i in 0..n {
            for j in i..n {
                let key = &rc[i..=j];
                if !entries.contains_key(key) {
                    let start = n - 1 - j;
                    entries.insert(
                        key.to_vec(),
                        IndexEntry::new(start, Orientation::ReverseComplement),
                    );
                }
            }
        }

        debug!(
            reference_len = n,
            forward_keys,
            reverse_keys = entries.len() - forward_keys,
            "Built substring index"
        );

        Self {
            entries,
            reference_len: n,
        }
    }

    /// Build the index, refusing references longer than `limit`
    ///
    /// # Errors
    ///
    /// Returns `IndexError::TooLarge` if the reference exceeds `limit` symbols.
    pub fn build_with_limit(reference: &[u8], limit: usize) -> Result<Self, IndexError> {
        if reference.len() > limit {
            return Err(IndexError::TooLarge {
                length: reference.len(),
                limit,
            });
        }
        Ok(Self::build(reference))
    }

    /// Exact lookup; `None` means the substring occurs in neither orientation
    #[must_use]
    pub fn lookup(&self, sub: &[u8]) -> Option<IndexEntry> {
        self.entries.get(sub).copied()
    }

    /// Number of distinct indexed substrings
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn reference_len(&self) -> usize {
        self.reference_len
    }
}

impl SegmentSource for SubstringIndex {
    fn extensions(&self, query: &[u8], start: usize) -> Vec<IndexEntry> {
        let mut found = Vec::new();
        for end in start..query.len() {
            // Indexed substrings are prefix-closed: once a prefix is missing, so is every extension
            match self.lookup(&query[start..=end]) {
                Some(entry) => found.push(entry),
                None => break,
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fwd(offset: usize) -> Option<IndexEntry> {
        Some(IndexEntry::new(offset, Orientation::Forward))
    }

    fn rev(offset: usize) -> Option<IndexEntry> {
        Some(IndexEntry::new(offset, Orientation::ReverseComplement))
    }

    #[test]
    fn test_every_forward_substring_is_forward() {
        let reference = b"GATTACA";
        let index = SubstringIndex::build(reference);
        for i in 0..reference.len() {
            for j in i..reference.len() {
                let entry = index.lookup(&reference[i..=j]).unwrap();
                assert_eq!(entry.orientation, Orientation::Forward);
                assert_eq!(&reference[entry.offset..=entry.offset + j - i], &reference[i..=j]);
            }
        }
    }

    #[test]
    fn test_last_forward_occurrence_wins() {
        let index = SubstringIndex::build(b"ACGTACGT");
        assert_eq!(index.lookup(b"ACGT"), fwd(4));
        assert_eq!(index.lookup(b"ACGTACGT"), fwd(0));
        assert_eq!(index.lookup(b"A"), fwd(4));
        assert_eq!(index.lookup(b"TA"), fwd(3));
    }

    #[test]
    fn test_reverse_complement_only_when_no_forward_entry() {
        // rc(AACG) = CGTT
        let index = SubstringIndex::build(b"AACG");
        assert_eq!(index.lookup(b"C"), fwd(2));
        assert_eq!(index.lookup(b"CG"), fwd(2));
        assert_eq!(index.lookup(b"CGT"), rev(1));
        assert_eq!(index.lookup(b"CGTT"), rev(0));
        assert_eq!(index.lookup(b"GTT"), rev(0));
        assert_eq!(index.lookup(b"T"), rev(1));
    }

    #[test]
    fn test_first_reverse_complement_occurrence_kept() {
        // rc(AAGAA) = TTCTT; "TT" appears at rc offsets 0 and 3
        let index = SubstringIndex::build(b"AAGAA");
        assert_eq!(index.lookup(b"TT"), rev(3));
        assert_eq!(index.lookup(b"T"), rev(4));
        assert_eq!(index.lookup(b"TTC"), rev(2));
    }

    #[test]
    fn test_absent_substring() {
        let index = SubstringIndex::build(b"ACGT");
        assert_eq!(index.lookup(b"AA"), None);
        assert_eq!(index.lookup(b"N"), None);
    }

    #[test]
    fn test_other_symbols_are_indexed_verbatim() {
        let index = SubstringIndex::build(b"ANC");
        assert_eq!(index.lookup(b"AN"), fwd(0));
        // rc(ANC) = GNT
        assert_eq!(index.lookup(b"GN"), rev(1));
    }

    #[test]
    fn test_empty_reference() {
        let index = SubstringIndex::build(b"");
        assert!(index.is_empty());
        assert!(index.extensions(b"ACGT", 0).is_empty());
    }

    #[test]
    fn test_build_with_limit() {
        let err = SubstringIndex::build_with_limit(b"ACGTACGT", 4).unwrap_err();
        assert!(matches!(err, IndexError::TooLarge { length: 8, limit: 4 }));
        assert!(SubstringIndex::build_with_limit(b"ACGT", 4).is_ok());
    }

    #[test]
    fn test_extensions_stop_at_first_miss() {
        let index = SubstringIndex::build(b"AC");
        let found = index.extensions(b"ACAC", 0);
        assert_eq!(
            found,
            vec![
                IndexEntry::new(0, Orientation::Forward),
                IndexEntry::new(0, Orientation::Forward)
            ]
        );
        assert_eq!(index.extensions(b"ACAC", 1).len(), 1);
    }
}
