use std::collections::HashMap;

use tracing::debug;

use crate::core::types::{RepeatKey, RepeatStat, Segment};

/// Finds segments nested inside other segments and aggregates their counts
pub struct RepeatDetector;

impl RepeatDetector {
    /// Report every contained segment once per (end, length, orientation).
    ///
    /// A segment is contained when some other segment, not identical in start, end and
    /// orientation, spans its whole reference interval. The reported count is the number of
    /// times the exact segment occurs in the decomposition. Output is sorted by end, then
    /// length, then orientation (forward first).
    #[must_use]
    pub fn detect(segments: &[Segment]) -> Vec<RepeatStat> {
        let mut count_map: HashMap<&Segment, usize> = HashMap::new();
        for seg in segments {
            *count_map.entry(seg).or_default() += 1;
        }

        let mut stats: HashMap<RepeatKey, RepeatStat> = HashMap::new();
        for small in segments {
            let is_contained = segments
                .iter()
                .any(|large| small.is_within(large) && large != small);
            if !is_contained {
                continue;
            }

            let stat = RepeatStat {
                end: small.end,
                length: small.len(),
                count: count_map.get(small).copied().unwrap_or(0),
                orientation: small.orientation,
            };
            stats.entry(stat.key()).or_insert(stat);
        }

        let mut result: Vec<RepeatStat> = stats.into_values().collect();
        sort_stats(&mut result);

        debug!(
            segments = segments.len(),
            distinct = count_map.len(),
            repeats = result.len(),
            "Detected nested repeats"
        );
        result
    }
}

/// Sort by end, then length, then orientation
pub fn sort_stats(stats: &mut [RepeatStat]) {
    stats.sort_by(|a, b| {
        a.end
            .cmp(&b.end)
            .then(a.length.cmp(&b.length))
            .then(a.orientation.cmp(&b.orientation))
    });
}
