//! Step-wise linear pattern search.
//!
//! The scan is an iterator: each `next()` probes one window of the compacted
//! array and reports whether it matched. The caller owns pacing and
//! cancellation (the session waits `search_step_ms` between steps and simply
//! drops the scan on reset). Highlights are addressed by compacted index and
//! mapped back to raw slots with [`highlight_slots`].

use super::Slot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(usize),
    NotFound,
}

/// One comparison of the pattern against the window starting at `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchStep {
    pub offset: usize,
    pub len: usize,
    pub matched: bool,
}

#[derive(Clone, Debug)]
pub struct SearchScan {
    haystack: Vec<u8>,
    pattern: Vec<u8>,
    next_offset: usize,
    outcome: Option<SearchOutcome>,
}

impl SearchScan {
    pub fn new(haystack: Vec<u8>, pattern: Vec<u8>) -> Self {
        let mut scan = Self {
            haystack,
            pattern,
            next_offset: 0,
            outcome: None,
        };
        if scan.last_offset().is_none() {
            scan.outcome = Some(SearchOutcome::NotFound);
        }
        scan
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Highest start offset worth probing; `None` if the pattern cannot fit.
    fn last_offset(&self) -> Option<usize> {
        if self.pattern.is_empty() {
            return None;
        }
        self.haystack.len().checked_sub(self.pattern.len())
    }

    /// Offset of the window the next step will probe, if the scan continues.
    pub fn peek_offset(&self) -> Option<usize> {
        if self.outcome.is_some() {
            return None;
        }
        Some(self.next_offset)
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<SearchOutcome> {
        self.outcome
    }
}

impl Iterator for SearchScan {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        let offset = self.peek_offset()?;
        let len = self.pattern.len();
        let matched = self.haystack[offset..offset + len] == self.pattern[..];
        if matched {
            self.outcome = Some(SearchOutcome::Found(offset));
        } else if Some(offset) == self.last_offset() {
            self.outcome = Some(SearchOutcome::NotFound);
        } else {
            self.next_offset += 1;
        }
        Some(SearchStep { offset, len, matched })
    }
}

impl std::iter::FusedIterator for SearchScan {}

/// Run a whole scan without pacing.
pub fn find(haystack: &[u8], pattern: &[u8]) -> SearchOutcome {
    let mut scan = SearchScan::new(haystack.to_vec(), pattern.to_vec());
    scan.by_ref().for_each(drop);
    scan.outcome.unwrap_or(SearchOutcome::NotFound)
}

/// Raw slot indices holding the present digits with compacted index in
/// `start..start + len`. Empty slots are skipped and never highlighted.
pub fn highlight_slots(slots: &[Slot], start: usize, len: usize) -> Vec<usize> {
    slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_some())
        .skip(start)
        .take(len)
        .map(|(raw, _)| raw)
        .collect()
}
