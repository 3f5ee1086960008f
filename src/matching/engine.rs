use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::sequence::Sequence;
use crate::core::types::{RepeatStat, Segment, TandemRepeat};
use crate::index::{AutomatonMatcher, IndexError, IndexStrategy, SegmentSource, SubstringIndex};
use crate::matching::repeats::RepeatDetector;
use crate::matching::segmenter::{Segmentation, SegmentationError, Segmenter};
use crate::matching::tandem;
use crate::utils::validation::DEFAULT_SUBSTRING_INDEX_LIMIT;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Index memory exhaustion: {0}")]
    IndexMemoryExhaustion(#[from] IndexError),

    #[error("Unresolvable segmentation: {0}")]
    UnresolvableSegmentation(#[from] SegmentationError),
}

impl AnnotateError {
    /// Query offset the failure was detected at, if it is tied to one
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnresolvableSegmentation(SegmentationError::Unresolvable { offset }) => {
                Some(*offset)
            }
            Self::IndexMemoryExhaustion(_) => None,
        }
    }
}

/// Configuration for one reference
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    /// Which index backs the segmenter
    pub strategy: IndexStrategy,
    /// Longest reference the substring index may be built for
    pub substring_index_limit: usize,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            strategy: IndexStrategy::Auto,
            substring_index_limit: DEFAULT_SUBSTRING_INDEX_LIMIT,
        }
    }
}

impl AnnotateConfig {
    /// Concrete strategy for a reference of `reference_len` symbols
    #[must_use]
    pub fn resolve_strategy(&self, reference_len: usize) -> IndexStrategy {
        match self.strategy {
            IndexStrategy::Auto if reference_len <= self.substring_index_limit => {
                IndexStrategy::Substring
            }
            IndexStrategy::Auto => IndexStrategy::Automaton,
            other => other,
        }
    }
}

/// Decomposition of one query plus its nested repeats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub segments: Vec<Segment>,
    pub repeats: Vec<RepeatStat>,
}

enum PreparedIndex {
    Substring(SubstringIndex),
    Automaton(AutomatonMatcher),
}

/// Reference-side state shared by every query annotated against it.
///
/// Indexes are read-only after construction, so one `Annotator` can serve queries from
/// several threads; each query run owns its DP table and key counter.
pub struct Annotator {
    reference: Sequence,
    strategy: IndexStrategy,
    index: PreparedIndex,
    tandem_matcher: OnceLock<AutomatonMatcher>,
}

impl Annotator {
    /// Build the index `config` selects for `reference`
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::IndexMemoryExhaustion` if the substring index is requested
    /// explicitly for a reference longer than the configured limit.
    pub fn new(reference: Sequence, config: &AnnotateConfig) -> Result<Self, AnnotateError> {
        let strategy = config.resolve_strategy(reference.len());
        let index = match strategy {
            IndexStrategy::Automaton => {
                PreparedIndex::Automaton(AutomatonMatcher::build(reference.as_bytes()))
            }
            _ => PreparedIndex::Substring(SubstringIndex::build_with_limit(
                reference.as_bytes(),
                config.substring_index_limit,
            )?),
        };

        info!(
            reference_len = reference.len(),
            strategy = ?strategy,
            "Prepared reference index"
        );

        Ok(Self {
            reference,
            strategy,
            index,
            tandem_matcher: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn reference(&self) -> &Sequence {
        &self.reference
    }

    /// Strategy actually in use (never `Auto`)
    #[must_use]
    pub fn strategy(&self) -> IndexStrategy {
        self.strategy
    }

    fn source(&self) -> &dyn SegmentSource {
        match &self.index {
            PreparedIndex::Substring(index) => index,
            PreparedIndex::Automaton(matcher) => matcher,
        }
    }

    fn matcher(&self) -> &AutomatonMatcher {
        match &self.index {
            PreparedIndex::Automaton(matcher) => matcher,
            PreparedIndex::Substring(_) => self
                .tandem_matcher
                .get_or_init(|| AutomatonMatcher::build(self.reference.as_bytes())),
        }
    }

    /// Decompose `query` into the fewest indexed segments
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::UnresolvableSegmentation` if some query symbol occurs in
    /// neither the reference nor its reverse complement.
    pub fn segment(&self, query: &Sequence) -> Result<Segmentation, AnnotateError> {
        if self.reference.is_empty() || query.is_empty() {
            debug!("Empty reference or query, nothing to segment");
            return Ok(Segmentation::default());
        }
        Ok(Segmenter::new(self.source()).segment(query.as_bytes())?)
    }

    /// Segment `query` and report nested repeats
    ///
    /// # Errors
    ///
    /// See [`Annotator::segment`].
    pub fn annotate(&self, query: &Sequence) -> Result<Annotation, AnnotateError> {
        let segmentation = self.segment(query)?;
        let repeats = RepeatDetector::detect(&segmentation.segments);
        Ok(Annotation {
            segments: segmentation.segments,
            repeats,
        })
    }

    /// Back-to-back copies of reference pieces in `query`, found with the automata
    #[must_use]
    pub fn tandem(&self, query: &Sequence) -> Vec<TandemRepeat> {
        if self.reference.is_empty() || query.is_empty() {
            return Vec::new();
        }
        tandem::scan(self.matcher(), query.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Orientation;

    fn annotator(reference: &str) -> Annotator {
        Annotator::new(Sequence::from(reference), &AnnotateConfig::default()).unwrap()
    }

    #[test]
    fn test_resolve_strategy() {
        let config = AnnotateConfig {
            strategy: IndexStrategy::Auto,
            substring_index_limit: 10,
        };
        assert_eq!(config.resolve_strategy(10), IndexStrategy::Substring);
        assert_eq!(config.resolve_strategy(11), IndexStrategy::Automaton);

        let config = AnnotateConfig {
            strategy: IndexStrategy::Automaton,
            substring_index_limit: 10,
        };
        assert_eq!(config.resolve_strategy(2), IndexStrategy::Automaton);
    }

    #[test]
    fn test_annotate_nested_repeat() {
        let annotation = annotator("ACGTACGT")
            .annotate(&Sequence::from("ACGTACGTACGT"))
            .unwrap();
        assert_eq!(annotation.segments.len(), 2);
        assert_eq!(
            annotation.repeats,
            vec![RepeatStat {
                end: 8,
                length: 4,
                count: 1,
                orientation: Orientation::Forward,
            }]
        );
    }

    #[test]
    fn test_empty_inputs_give_empty_results() {
        let empty_ref = annotator("");
        assert_eq!(
            empty_ref.annotate(&Sequence::from("ACGT")).unwrap(),
            Annotation::default()
        );
        assert!(empty_ref.tandem(&Sequence::from("ACGT")).is_empty());

        let ann = annotator("ACGT");
        assert_eq!(
            ann.annotate(&Sequence::from("")).unwrap(),
            Annotation::default()
        );
    }

    #[test]
    fn test_unresolvable_query() {
        let err = annotator("ACGT")
            .annotate(&Sequence::from("ACGN"))
            .unwrap_err();
        assert!(matches!(err, AnnotateError::UnresolvableSegmentation(_)));
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_explicit_substring_strategy_over_limit() {
        let config = AnnotateConfig {
            strategy: IndexStrategy::Substring,
            substring_index_limit: 4,
        };
        let result = Annotator::new(Sequence::from("ACGTA"), &config);
        assert!(matches!(
            result,
            Err(AnnotateError::IndexMemoryExhaustion(IndexError::TooLarge {
                length: 5,
                limit: 4
            }))
        ));
    }

    #[test]
    fn test_strategies_agree() {
        let reference = Sequence::from("TTGACCAGTAGGCATAC");
        let query = Sequence::from("GTATGCCTACTGGTCAATTGACCAGTAGG");
        let substring = Annotator::new(
            reference.clone(),
            &AnnotateConfig {
                strategy: IndexStrategy::Substring,
                ..AnnotateConfig::default()
            },
        )
        .unwrap();
        let automaton = Annotator::new(
            reference,
            &AnnotateConfig {
                strategy: IndexStrategy::Automaton,
                ..AnnotateConfig::default()
            },
        )
        .unwrap();
        assert_eq!(automaton.strategy(), IndexStrategy::Automaton);
        assert_eq!(
            substring.annotate(&query).unwrap(),
            automaton.annotate(&query).unwrap()
        );
        assert_eq!(substring.tandem(&query), automaton.tandem(&query));
    }
}
