use std::collections::BTreeMap;

/// One equivalence class of end positions
#[derive(Debug, Clone)]
struct State {
    /// Length of the longest string in the class
    len: usize,
    /// Suffix link; `None` only for the initial state
    link: Option<usize>,
    next: BTreeMap<u8, usize>,
    /// Smallest end position (0-based, inclusive) of the strings in this class
    first_end: usize,
    /// Clones carry no end position of their own
    is_clone: bool,
}

impl State {
    fn root() -> Self {
        Self {
            len: 0,
            link: None,
            next: BTreeMap::new(),
            first_end: 0,
            is_clone: true,
        }
    }
}

/// Online suffix automaton stored as a state arena.
///
/// States are addressed by index; clones created during [`extend`](Self::extend) are appended
/// at the end. State 0 is the initial state.
#[derive(Debug, Clone)]
pub struct SuffixAutomaton {
    states: Vec<State>,
    last: usize,
    text_len: usize,
}

impl Default for SuffixAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixAutomaton {
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: vec![State::root()],
            last: 0,
            text_len: 0,
        }
    }

    /// Build an automaton over `text` by extending one symbol at a time
    #[must_use]
    pub fn build(text: &[u8]) -> Self {
        let mut sam = Self::new();
        sam.states.reserve(text.len().saturating_mul(2));
        for &c in text {
            sam.extend(c);
        }
        sam
    }

    /// Append one symbol to the indexed text
    pub fn extend(&mut self, c: u8) {
        let cur = self.states.len();
        let cur_len = self.states[self.last].len + 1;
        self.states.push(State {
            len: cur_len,
            link: None,
            next: BTreeMap::new(),
            first_end: cur_len - 1,
            is_clone: false,
        });

        let mut p = Some(self.last);
        while let Some(pi) = p {
            if self.states[pi].next.contains_key(&c) {
                break;
            }
            self.states[pi].next.insert(c, cur);
            p = self.states[pi].link;
        }

        match p {
            None => self.states[cur].link = Some(0),
            Some(pi) => {
                let q = self.states[pi].next[&c];
                if self.states[pi].len + 1 == self.states[q].len {
                    self.states[cur].link = Some(q);
                } else {
                    let clone = self.states.len();
                    let cloned = State {
                        len: self.states[pi].len + 1,
                        link: self.states[q].link,
                        next: self.states[q].next.clone(),
                        first_end: self.states[q].first_end,
                        is_clone: true,
                    };
                    self.states.push(cloned);

                    let mut p = Some(pi);
                    while let Some(pj) = p {
                        if self.states[pj].next.get(&c) != Some(&q) {
                            break;
                        }
                        self.states[pj].next.insert(c, clone);
                        p = self.states[pj].link;
                    }
                    self.states[q].link = Some(clone);
                    self.states[cur].link = Some(clone);
                }
            }
        }

        self.last = cur;
        self.text_len += 1;
    }

    /// Follow the transition on `c` from `state`
    #[inline]
    #[must_use]
    pub fn transition(&self, state: usize, c: u8) -> Option<usize> {
        self.states[state].next.get(&c).copied()
    }

    /// State reached by reading all of `pattern` from the initial state
    #[must_use]
    pub fn walk(&self, pattern: &[u8]) -> Option<usize> {
        pattern
            .iter()
            .try_fold(0, |state, &c| self.transition(state, c))
    }

    #[must_use]
    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.walk(pattern).is_some()
    }

    /// Number of symbols of `query[start..]` readable from the initial state.
    ///
    /// Never fails; 0 means not even the first symbol occurs.
    #[must_use]
    pub fn longest_match_from(&self, query: &[u8], start: usize) -> usize {
        let mut state = 0;
        let mut matched = 0;
        for &c in query.iter().skip(start) {
            match self.transition(state, c) {
                Some(next) => {
                    state = next;
                    matched += 1;
                }
                None => break,
            }
        }
        matched
    }

    /// 0-based start of the first occurrence of `pattern` in the indexed text
    #[must_use]
    pub fn first_occurrence(&self, pattern: &[u8]) -> Option<usize> {
        if pattern.is_empty() {
            return Some(0);
        }
        self.walk(pattern)
            .map(|state| self.states[state].first_end + 1 - pattern.len())
    }

    /// Smallest end position of the class `state` belongs to
    #[inline]
    #[must_use]
    pub fn first_end(&self, state: usize) -> usize {
        self.states[state].first_end
    }

    /// Largest end position of every state, indexed by state.
    ///
    /// Computed by pushing each original state's end position up the suffix-link tree,
    /// longest classes first.
    #[must_use]
    pub fn last_end_positions(&self) -> Vec<usize> {
        let mut last: Vec<usize> = self
            .states
            .iter()
            .map(|s| if s.is_clone { 0 } else { s.first_end })
            .collect();

        let mut order: Vec<usize> = (1..self.states.len()).collect();
        order.sort_unstable_by(|&a, &b| self.states[b].len.cmp(&self.states[a].len));
        for v in order {
            if let Some(link) = self.states[v].link {
                last[link] = last[link].max(last[v]);
            }
        }
        last
    }

    /// Number of states, including the initial state
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Length of the indexed text
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_every_substring() {
        let text = b"ACGTTGCAAC";
        let sam = SuffixAutomaton::build(text);
        for i in 0..text.len() {
            for j in i..text.len() {
                assert!(sam.contains(&text[i..=j]));
            }
        }
        assert!(!sam.contains(b"AAA"));
        assert!(!sam.contains(b"GG"));
    }

    #[test]
    fn test_state_count_bound() {
        let text = b"ACGTACGTTTGACCA";
        let sam = SuffixAutomaton::build(text);
        assert!(sam.num_states() <= 2 * text.len());
        assert_eq!(sam.text_len(), text.len());
    }

    #[test]
    fn test_longest_match_from() {
        let sam = SuffixAutomaton::build(b"ACGT");
        assert_eq!(sam.longest_match_from(b"ACGTACGT", 0), 4);
        assert_eq!(sam.longest_match_from(b"ACGTACGT", 2), 2);
        assert_eq!(sam.longest_match_from(b"ACGTACGT", 7), 1);
        assert_eq!(sam.longest_match_from(b"NACG", 0), 0);
        assert_eq!(sam.longest_match_from(b"ACG", 3), 0);
    }

    #[test]
    fn test_longest_match_bounds() {
        let reference = b"AACGT";
        let sam = SuffixAutomaton::build(reference);
        let query = b"AACGTAACGTAACG";
        for start in 0..query.len() {
            let len = sam.longest_match_from(query, start);
            assert!(len <= query.len() - start);
            assert!(len <= reference.len());
        }
    }

    #[test]
    fn test_first_occurrence() {
        let sam = SuffixAutomaton::build(b"GATTACATTA");
        assert_eq!(sam.first_occurrence(b"TTA"), Some(2));
        assert_eq!(sam.first_occurrence(b"A"), Some(1));
        assert_eq!(sam.first_occurrence(b"CATTA"), Some(5));
        assert_eq!(sam.first_occurrence(b"GG"), None);
    }

    #[test]
    fn test_last_end_positions() {
        let text = b"GATTACATTA";
        let sam = SuffixAutomaton::build(text);
        let last = sam.last_end_positions();
        let state = sam.walk(b"TTA").unwrap();
        assert_eq!(last[state], 9);
        let state = sam.walk(b"A").unwrap();
        assert_eq!(last[state], 9);
        let state = sam.walk(b"GA").unwrap();
        assert_eq!(last[state], 1);
    }

    #[test]
    fn test_empty_automaton() {
        let sam = SuffixAutomaton::build(b"");
        assert_eq!(sam.num_states(), 1);
        assert_eq!(sam.longest_match_from(b"ACGT", 0), 0);
    }
}
