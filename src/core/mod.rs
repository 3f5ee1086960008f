//! Core data types for repeat annotation.
//!
//! - [`Sequence`]: an immutable symbol sequence over `{A, C, G, T}` plus pass-through symbols
//! - [`reverse_complement`]: reverse symbol order and apply `A<->T`, `C<->G`
//! - [`Segment`]: one piece of a query decomposition, in 1-based reference coordinates
//! - [`RepeatStat`], [`TandemRepeat`]: reportable results
//!
//! ## Coordinates
//!
//! | Type | Base | Interval |
//! |------|------|----------|
//! | `IndexEntry` offsets | 0 | start only |
//! | `Segment` | 1 | inclusive |
//! | `RepeatSpan` | 0 | half-open |

pub mod sequence;
pub mod types;

pub use sequence::{complement, reverse_complement, Sequence};
pub use types::{Orientation, RepeatSpan, RepeatStat, Segment, TandemRepeat};
