use serde::{Deserialize, Serialize};

/// Whether a piece matches the reference read forward or as its reverse complement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Forward,
    ReverseComplement,
}

impl Orientation {
    #[must_use]
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::ReverseComplement)
    }

    /// "Yes"/"No" answer to "is this piece reversed?"
    #[must_use]
    pub fn as_yes_no(self) -> &'static str {
        if self.is_reverse() {
            "Yes"
        } else {
            "No"
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::ReverseComplement => write!(f, "-"),
        }
    }
}

/// Identity used by the segmenter to count how often a reference interval was chosen.
///
/// 0-based inclusive reference coordinates; orientation is deliberately not part of it.
pub type SegmentKey = (usize, usize);

/// One piece of a query decomposition.
///
/// `start` and `end` are 1-based inclusive reference coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub orientation: Orientation,
}

impl Segment {
    #[must_use]
    pub fn new(start: usize, end: usize, orientation: Orientation) -> Self {
        Self {
            start,
            end,
            orientation,
        }
    }

    /// Number of symbols covered (same in query and reference space)
    #[must_use]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// True if `self` lies inside `other`'s reference interval
    #[must_use]
    pub fn is_within(&self, other: &Segment) -> bool {
        other.start <= self.start && self.end <= other.end
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}] {}", self.start, self.end, self.orientation)
    }
}

/// Deduplication key for repeat statistics: (end, length, orientation)
pub type RepeatKey = (usize, usize, Orientation);

/// Aggregated record for a segment nested inside another segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatStat {
    /// 1-based reference end of the nested segment
    pub end: usize,
    pub length: usize,
    /// How many times the exact (start, end, orientation) segment appears in the decomposition
    pub count: usize,
    pub orientation: Orientation,
}

impl RepeatStat {
    #[must_use]
    pub fn key(&self) -> RepeatKey {
        (self.end, self.length, self.orientation)
    }
}

/// A run of back-to-back copies of one reference piece in the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TandemRepeat {
    /// 0-based query offset of the first copy
    pub query_start: usize,
    /// 0-based offset of the first reference occurrence of the unit
    pub reference_start: usize,
    /// Unit length
    pub length: usize,
    /// Number of consecutive copies
    pub count: usize,
    pub orientation: Orientation,
}

impl TandemRepeat {
    #[must_use]
    pub fn span(&self) -> RepeatSpan {
        RepeatSpan {
            query_start: self.query_start,
            query_end: self.query_start + self.length,
            reference_start: self.reference_start,
            reference_end: self.reference_start + self.length,
        }
    }
}

/// Positional form of a tandem repeat unit, 0-based half-open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatSpan {
    pub query_start: usize,
    pub query_end: usize,
    pub reference_start: usize,
    pub reference_end: usize,
}

impl std::fmt::Display for RepeatSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.query_start, self.query_end, self.reference_start, self.reference_end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_order() {
        assert!(Orientation::Forward < Orientation::ReverseComplement);
        assert_eq!(Orientation::ReverseComplement.as_yes_no(), "Yes");
        assert_eq!(Orientation::Forward.as_yes_no(), "No");
    }

    #[test]
    fn test_segment_len_and_containment() {
        let outer = Segment::new(1, 8, Orientation::Forward);
        let inner = Segment::new(5, 8, Orientation::Forward);
        assert_eq!(outer.len(), 8);
        assert_eq!(inner.len(), 4);
        assert!(inner.is_within(&outer));
        assert!(!outer.is_within(&inner));
    }

    #[test]
    fn test_orientation_serde() {
        let json = serde_json::to_string(&Orientation::ReverseComplement).unwrap();
        assert_eq!(json, "\"reverse_complement\"");
    }

    #[test]
    fn test_tandem_span() {
        let repeat = TandemRepeat {
            query_start: 3,
            reference_start: 10,
            length: 4,
            count: 2,
            orientation: Orientation::Forward,
        };
        assert_eq!(repeat.span().to_string(), "(3,7,10,14)");
    }
}
