//! # ref-repeats
//!
//! A library for describing a query sequence as a series of exact pieces of a reference
//! sequence, and for reporting which of those pieces recur.
//!
//! Each piece is a substring of the reference, read either forward or as its reverse
//! complement. The query is split into the fewest such pieces; pieces whose reference interval
//! sits inside another piece's interval are reported with how often they occur. There is no
//! scoring of mismatches or gaps: only exact identity counts.
//!
//! ## Features
//!
//! - **Substring index**: exhaustive map for short references, with fixed precedence rules
//! - **Suffix automata**: linear-size index over the reference and its reverse complement
//! - **Minimal decomposition**: dynamic program with a tie-break that favors recurring pieces
//! - **Nested repeat report**: containment-based detection with per-piece counts
//! - **Tandem scan**: back-to-back copies of the longest matching pieces
//!
//! ## Example
//!
//! ```rust
//! use ref_repeats::{AnnotateConfig, Annotator, Sequence};
//!
//! let annotator = Annotator::new(Sequence::from("ACGTACGT"), &AnnotateConfig::default()).unwrap();
//! let annotation = annotator.annotate(&Sequence::from("ACGTACGTACGT")).unwrap();
//!
//! assert_eq!(annotation.segments.len(), 2);
//! assert_eq!(annotation.repeats[0].end, 8);
//! assert_eq!(annotation.repeats[0].length, 4);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequences, reverse complement, segments and result types
//! - [`index`]: Substring index and suffix automata
//! - [`matching`]: Segmenter, repeat detector, tandem scan and the pipeline
//! - [`parsing`]: FASTA and plain text readers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod index;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::sequence::{reverse_complement, Sequence};
pub use crate::core::types::*;
pub use index::{AutomatonMatcher, IndexEntry, IndexStrategy, SegmentSource, SubstringIndex};
pub use matching::engine::{AnnotateConfig, AnnotateError, Annotation, Annotator};
pub use matching::repeats::RepeatDetector;
pub use matching::segmenter::{Segmentation, SegmentationError, Segmenter};
