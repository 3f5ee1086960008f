use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::core::types::{Segment, SegmentKey};
use crate::index::{IndexEntry, SegmentSource};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentationError {
    #[error("No indexed substring starts at query offset {offset}; the query cannot be covered by the reference")]
    Unresolvable { offset: usize },
}

/// Choice made for one query offset during the DP
#[derive(Debug, Clone, Copy)]
struct Step {
    /// Query offset right after the chosen segment
    next: usize,
    entry: IndexEntry,
}

impl Step {
    /// Counter key for this step's start with a span of `len` symbols
    fn key_with_len(&self, len: usize) -> SegmentKey {
        (self.entry.offset, self.entry.offset + len - 1)
    }
}

/// A query decomposition, in query order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub segments: Vec<Segment>,
}

impl Segmentation {
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// 0-based half-open query span of every segment
    pub fn query_spans(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.segments.iter().scan(0, |pos, seg| {
            let start = *pos;
            *pos += seg.len();
            Some((start, *pos))
        })
    }
}

/// Decomposes a query into the fewest indexed pieces
pub struct Segmenter<'a, S: SegmentSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: SegmentSource + ?Sized> Segmenter<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Run the DP right to left, then follow the trace from offset 0.
    ///
    /// For each offset candidates are tried by increasing length. A candidate replaces the
    /// current best when it needs fewer segments, or when it ties and its key has been chosen
    /// more often at higher offsets than the best's start spanning the candidate's length.
    ///
    /// # Errors
    ///
    /// Returns `SegmentationError::Unresolvable` with the lowest query offset at which no
    /// indexed substring starts.
    pub fn segment(&self, query: &[u8]) -> Result<Segmentation, SegmentationError> {
        let len = query.len();
        if len == 0 {
            return Ok(Segmentation::default());
        }

        let mut dp: Vec<Option<usize>> = vec![None; len + 1];
        dp[len] = Some(0);
        let mut trace: Vec<Option<Step>> = vec![None; len + 1];
        let mut seg_count: HashMap<SegmentKey, usize> = HashMap::new();
        let mut unmatched: Option<usize> = None;

        for i in (0..len).rev() {
            let extensions = self.source.extensions(query, i);
            if extensions.is_empty() {
                unmatched = Some(i);
                continue;
            }

            let mut best: Option<(usize, Step)> = None;
            for (k, entry) in extensions.into_iter().enumerate() {
                let next = i + k + 1;
                // Offsets that cannot reach the end are never part of a full cover
                let Some(rest) = dp[next] else { continue };
                let segments = 1 + rest;
                let candidate = Step { next, entry };
                let sub_len = k + 1;

                match best {
                    Some((min_segments, _)) if segments > min_segments => {}
                    Some((min_segments, current)) if segments == min_segments => {
                        let new_count = count_of(&seg_count, candidate.key_with_len(sub_len));
                        let best_count = count_of(&seg_count, current.key_with_len(sub_len));
                        if new_count > best_count {
                            best = Some((min_segments, candidate));
                        }
                    }
                    _ => best = Some((segments, candidate)),
                }
            }

            if let Some((min_segments, step)) = best {
                dp[i] = Some(min_segments);
                trace[i] = Some(step);
                *seg_count.entry(step.key_with_len(step.next - i)).or_default() += 1;
            }
        }

        if dp[0].is_none() {
            let offset = unmatched.unwrap_or(0);
            debug!(offset, "Query segmentation failed");
            return Err(SegmentationError::Unresolvable { offset });
        }

        let mut segments = Vec::new();
        let mut pos = 0;
        while pos < len {
            let Some(step) = trace[pos] else {
                return Err(SegmentationError::Unresolvable { offset: pos });
            };
            let sub_len = step.next - pos;
            segments.push(Segment::new(
                step.entry.offset + 1,
                step.entry.offset + sub_len,
                step.entry.orientation,
            ));
            pos = step.next;
        }

        debug!(
            query_len = len,
            segments = segments.len(),
            distinct_keys = seg_count.len(),
            "Segmented query"
        );

        Ok(Segmentation { segments })
    }
}

fn count_of(counts: &HashMap<SegmentKey, usize>, key: SegmentKey) -> usize {
    counts.get(&key).copied().unwrap_or(0)
}
