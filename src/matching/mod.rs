//! Query decomposition and repeat detection.
//!
//! - [`Segmenter`]: dynamic program splitting a query into the fewest indexed pieces
//! - [`RepeatDetector`]: finds pieces nested inside other pieces and counts them
//! - [`tandem`]: back-to-back copies of longest matches, read off the automaton profile
//! - [`Annotator`]: runs the whole pipeline for one reference
//!
//! ## Pipeline
//!
//! 1. **Index**: substring map or suffix automata over the reference and its reverse complement
//! 2. **Segment**: right-to-left DP; ties go to the piece whose reference interval was already
//!    chosen more often further along the query
//! 3. **Detect**: keep pieces contained in a different piece, one record per
//!    (end, length, orientation), sorted
//!
//! ## Example
//!
//! ```rust
//! use ref_repeats::{AnnotateConfig, Annotator, Sequence};
//!
//! let annotator = Annotator::new(Sequence::from("ACGTACGT"), &AnnotateConfig::default()).unwrap();
//! let annotation = annotator.annotate(&Sequence::from("ACGTACGTACGT")).unwrap();
//!
//! for stat in &annotation.repeats {
//!     println!("{} {} {} {}", stat.end, stat.length, stat.count, stat.orientation);
//! }
//! ```

pub mod engine;
pub mod repeats;
pub mod segmenter;
pub mod tandem;

pub use engine::{AnnotateConfig, AnnotateError, Annotation, Annotator};
pub use repeats::RepeatDetector;
pub use segmenter::{Segmentation, SegmentationError, Segmenter};
