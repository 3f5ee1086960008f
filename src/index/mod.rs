//! Exact-substring indexes over a reference and its reverse complement.
//!
//! Two interchangeable strategies answer the same question, "which query prefixes starting at
//! offset K occur in the reference, and where":
//!
//! - [`SubstringIndex`]: a map from every substring to one [`IndexEntry`]. Cubic in the
//!   reference length, so only suitable for short references.
//! - [`AutomatonMatcher`]: a pair of suffix automata (forward and reverse complement) with
//!   linear construction, used for long references and for the tandem scan.
//!
//! Both implement [`SegmentSource`] and report identical entries, so the segmenter produces the
//! same decomposition whichever one it is handed.
//!
//! ## Entry selection
//!
//! A forward occurrence always wins over a reverse-complement one. Among forward occurrences the
//! entry holds the last one in the reference; among reverse-complement occurrences it holds the
//! first one in the reverse-complement string. Both rules end up reporting the largest
//! original-coordinate start.

pub mod automaton;
pub mod matcher;
pub mod substring;

use thiserror::Error;

use crate::core::types::Orientation;

pub use automaton::SuffixAutomaton;
pub use matcher::{AutomatonMatcher, MatchProfile, PositionMatch};
pub use substring::SubstringIndex;

/// Where an indexed substring sits in the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    /// 0-based start in original reference coordinates
    pub offset: usize,
    pub orientation: Orientation,
}

impl IndexEntry {
    #[must_use]
    pub fn new(offset: usize, orientation: Orientation) -> Self {
        Self {
            offset,
            orientation,
        }
    }
}

/// Anything the segmenter can ask for indexed extensions of a query offset
pub trait SegmentSource {
    /// Entries for `query[start..=start + k]`, for `k = 0, 1, ...`, stopping at the first
    /// length with no entry.
    fn extensions(&self, query: &[u8], start: usize) -> Vec<IndexEntry>;
}

/// Which index to build over the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IndexStrategy {
    /// Substring map for short references, automata above the size limit
    #[default]
    Auto,
    /// Exhaustive substring map
    Substring,
    /// Forward and reverse-complement suffix automata
    Automaton,
}

#[derive(Error, Debug)]
pub enum IndexError {
    #[error(
        "Reference of {length} symbols is too long for the substring index (limit {limit}); use the automaton strategy"
    )]
    TooLarge { length: usize, limit: usize },
}
