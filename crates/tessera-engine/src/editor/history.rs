use std::collections::VecDeque;

use super::document::Snapshot;

/// Bounded undo/redo history of document snapshots.
///
/// `record` stores the state *before* an edit. Recording drops the redo branch.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self { undo: VecDeque::new(), redo: Vec::new(), limit: limit.max(1) }
    }

    pub fn record(&mut self, before: Snapshot) {
        if self.undo.len() == self.limit {
            self.undo.pop_front();
        }
        self.undo.push_back(before);
        self.redo.clear();
    }

    /// Returns the state to restore, saving `current` for redo.
    /// `None` at the start of history.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo.pop_back()?;
        self.redo.push(current);
        Some(prev)
    }

    /// Returns the state to restore, saving `current` for undo.
    /// `None` at the end of history.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(s: &str) -> Snapshot {
        Snapshot { text: s.to_string(), cursor: s.len(), anchor: s.len() }
    }

    #[test]
    fn empty_history_is_noop_both_ways() {
        let mut h = History::new(8);
        assert_eq!(h.undo(snap("a")), None);
        assert_eq!(h.redo(snap("a")), None);
    }

    #[test]
    fn undo_then_redo() {
        let mut h = History::new(8);
        h.record(snap(""));
        assert_eq!(h.undo(snap("a")), Some(snap("")));
        assert!(h.can_redo());
        assert_eq!(h.redo(snap("")), Some(snap("a")));
        assert!(!h.can_redo());
    }

    #[test]
    fn recording_drops_redo_branch() {
        let mut h = History::new(8);
        h.record(snap(""));
        h.undo(snap("a"));
        h.record(snap(""));
        assert!(!h.can_redo());
    }

    #[test]
    fn limit_drops_oldest() {
        let mut h = History::new(2);
        h.record(snap("1"));
        h.record(snap("2"));
        h.record(snap("3"));
        assert_eq!(h.undo(snap("4")), Some(snap("3")));
        assert_eq!(h.undo(snap("3")), Some(snap("2")));
        assert_eq!(h.undo(snap("2")), None);
    }
}
