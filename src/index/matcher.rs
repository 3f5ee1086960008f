use tracing::debug;

use crate::core::sequence::reverse_complement;
use crate::core::types::Orientation;

use super::automaton::SuffixAutomaton;
use super::{IndexEntry, SegmentSource};

/// Longest reference match starting at one query offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionMatch {
    pub length: usize,
    pub orientation: Orientation,
}

impl PositionMatch {
    /// Combine forward and reverse-complement match lengths.
    ///
    /// Reverse wins when it is longer, and also on a non-zero tie.
    #[must_use]
    pub fn resolve(forward_len: usize, reverse_len: usize) -> Self {
        let reverse = reverse_len > forward_len || (reverse_len == forward_len && reverse_len > 0);
        Self {
            length: forward_len.max(reverse_len),
            orientation: if reverse {
                Orientation::ReverseComplement
            } else {
                Orientation::Forward
            },
        }
    }

    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        self.length == 0
    }
}

/// Per-query-offset longest matches
pub type MatchProfile = Vec<PositionMatch>;

/// Suffix automata over the reference and over its reverse complement
#[derive(Debug, Clone)]
pub struct AutomatonMatcher {
    forward: SuffixAutomaton,
    reverse: SuffixAutomaton,
    /// Largest end position per forward state, for "last occurrence" offsets
    forward_last_end: Vec<usize>,
    reference_len: usize,
}

impl AutomatonMatcher {
    #[must_use]
    pub fn build(reference: &[u8]) -> Self {
        let forward = SuffixAutomaton::build(reference);
        let reverse = SuffixAutomaton::build(&reverse_complement(reference));
        let forward_last_end = forward.last_end_positions();

        debug!(
            reference_len = reference.len(),
            forward_states = forward.num_states(),
            reverse_states = reverse.num_states(),
            "Built suffix automata"
        );

        Self {
            forward,
            reverse,
            forward_last_end,
            reference_len: reference.len(),
        }
    }

    #[must_use]
    pub fn forward(&self) -> &SuffixAutomaton {
        &self.forward
    }

    #[must_use]
    pub fn reverse(&self) -> &SuffixAutomaton {
        &self.reverse
    }

    #[must_use]
    pub fn reference_len(&self) -> usize {
        self.reference_len
    }

    /// Longest match at `start` in either orientation
    #[must_use]
    pub fn longest_match_from(&self, query: &[u8], start: usize) -> PositionMatch {
        PositionMatch::resolve(
            self.forward.longest_match_from(query, start),
            self.reverse.longest_match_from(query, start),
        )
    }

    /// Longest match for every query offset
    #[must_use]
    pub fn profile(&self, query: &[u8]) -> MatchProfile {
        (0..query.len())
            .map(|start| self.longest_match_from(query, start))
            .collect()
    }

    /// First reference offset of `unit`, reverse-complementing it first for reverse matches
    #[must_use]
    pub fn reference_start(&self, unit: &[u8], orientation: Orientation) -> Option<usize> {
        match orientation {
            Orientation::Forward => self.forward.first_occurrence(unit),
            Orientation::ReverseComplement => {
                self.forward.first_occurrence(&reverse_complement(unit))
            }
        }
    }
}

impl SegmentSource for AutomatonMatcher {
    fn extensions(&self, query: &[u8], start: usize) -> Vec<IndexEntry> {
        let n = self.reference_len;
        let mut fwd = Some(0);
        let mut rev = Some(0);
        let mut found = Vec::new();

        for (k, &c) in query.iter().skip(start).enumerate() {
            fwd = fwd.and_then(|s| self.forward.transition(s, c));
            rev = rev.and_then(|s| self.reverse.transition(s, c));
            let len = k + 1;

            let entry = match (fwd, rev) {
                (Some(s), _) => {
                    IndexEntry::new(self.forward_last_end[s] + 1 - len, Orientation::Forward)
                }
                (None, Some(s)) => {
                    // first start in the reverse-complement string, mapped back to reference coordinates
                    let rc_start = self.reverse.first_end(s) + 1 - len;
                    IndexEntry::new(n - rc_start - len, Orientation::ReverseComplement)
                }
                (None, None) => break,
            };
            found.push(entry);
        }
        found
    }
}
