use tracing::{debug, warn};

use crate::core::types::TandemRepeat;
use crate::index::{AutomatonMatcher, MatchProfile};

/// Scan the query for back-to-back copies of its longest reference matches.
///
/// At each offset the unit is the longest match there. Following copies must have a match at
/// least as long, in the same orientation, and spell the same unit. Offsets with no match are
/// skipped one at a time; otherwise scanning resumes after the last copy.
#[must_use]
pub fn scan(matcher: &AutomatonMatcher, query: &[u8]) -> Vec<TandemRepeat> {
    let profile = matcher.profile(query);
    scan_profile(matcher, query, &profile)
}

/// [`scan`] over a precomputed profile
#[must_use]
pub fn scan_profile(
    matcher: &AutomatonMatcher,
    query: &[u8],
    profile: &MatchProfile,
) -> Vec<TandemRepeat> {
    let mut result = Vec::new();
    let mut i = 0;

    while i < query.len() {
        let here = profile[i];
        if here.is_unmatched() {
            i += 1;
            continue;
        }

        let unit_len = here.length;
        let unit = &query[i..i + unit_len];
        let mut count = 1;
        let mut j = i + unit_len;
        while j + unit_len <= query.len() {
            let next = profile[j];
            if next.length < unit_len || next.orientation != here.orientation {
                break;
            }
            if &query[j..j + unit_len] != unit {
                break;
            }
            count += 1;
            j += unit_len;
        }

        match matcher.reference_start(unit, here.orientation) {
            Some(reference_start) => result.push(TandemRepeat {
                query_start: i,
                reference_start,
                length: unit_len,
                count,
                orientation: here.orientation,
            }),
            None => warn!(query_start = i, unit_len, "Matched unit not found in reference"),
        }
        i = j;
    }

    debug!(
        query_len = query.len(),
        repeats = result.len(),
        "Tandem scan complete"
    );
    result
}
