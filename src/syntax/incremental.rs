// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-line state caching for incremental re-highlighting.
//!
//! After an edit the host re-runs highlighting top-to-bottom from the first
//! changed line. This manager records, per line, the resulting state id and
//! a hash of the line's text; once a line reproduces both cached values,
//! lines after it are known to be unaffected and the pass can stop.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::syntax::stack_pool::{EMPTY_STATE, StateId};

#[derive(Debug, Clone, Copy)]
struct LineEntry {
    state_id: StateId,
    hash: Option<u64>,
}

impl LineEntry {
    const UNKNOWN: LineEntry = LineEntry { state_id: EMPTY_STATE, hash: None };
}

/// Cache of `(final state id, content hash)` per line of one document.
#[derive(Debug, Default)]
pub struct IncrementalManager {
    lines: Vec<LineEntry>,
}

impl IncrementalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows (new entries unknown) or shrinks the cache to `count` lines.
    pub fn set_line_count(&mut self, count: usize) {
        self.lines.resize(count, LineEntry::UNKNOWN);
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Records the outcome of tokenizing a line.
    ///
    /// Returns `true` if the resulting state or the text changed since the
    /// last visit (including a previously unknown line), meaning downstream
    /// lines must still be re-examined; `false` means the host may stop
    /// propagating re-tokenization past this line. Out-of-range indices
    /// conservatively report a change.
    pub fn update_line(&mut self, index: usize, text: &str, final_state_id: StateId) -> bool {
        let Some(entry) = self.lines.get_mut(index) else {
            return true;
        };

        let hash = hash_text(text);
        let changed = entry.state_id != final_state_id || entry.hash != Some(hash);
        entry.state_id = final_state_id;
        entry.hash = Some(hash);
        changed
    }

    /// The stored final state of the previous line, used as the
    /// predecessor state for tokenizing line `index`. `EMPTY_STATE` for
    /// line 0 and out-of-range indices.
    pub fn get_initial_state_id(&self, index: usize) -> StateId {
        if index == 0 {
            return EMPTY_STATE;
        }
        match self.lines.get(index - 1) {
            Some(entry) => entry.state_id,
            None => EMPTY_STATE,
        }
    }

    /// Marks every line at or after `index` as needing re-tokenization by
    /// resetting its entry to unknown.
    pub fn invalidate_from(&mut self, index: usize) {
        for entry in self.lines.iter_mut().skip(index) {
            entry.state_id = EMPTY_STATE;
            entry.hash = None;
        }
    }

    /// Drops all entries (language switch or document reset).
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

fn hash_text(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_reports_change() {
        let mut manager = IncrementalManager::new();
        manager.set_line_count(3);

        assert!(manager.update_line(0, "hello", 0));
    }

    #[test]
    fn test_repeat_update_reports_no_change() {
        let mut manager = IncrementalManager::new();
        manager.set_line_count(3);

        manager.update_line(1, "let x = 1;", 4);
        assert!(!manager.update_line(1, "let x = 1;", 4));
    }

    #[test]
    fn test_changed_text_or_state_reports_change() {
        let mut manager = IncrementalManager::new();
        manager.set_line_count(2);
        manager.update_line(0, "a", 1);

        assert!(manager.update_line(0, "b", 1));
        assert!(manager.update_line(0, "b", 2));
        assert!(!manager.update_line(0, "b", 2));
    }

    #[test]
    fn test_invalidate_from_forces_change() {
        let mut manager = IncrementalManager::new();
        manager.set_line_count(4);
        manager.update_line(2, "stable", 7);
        assert!(!manager.update_line(2, "stable", 7));

        manager.invalidate_from(2);
        assert!(manager.update_line(2, "stable", 7));
        assert!(!manager.update_line(2, "stable", 7));
    }

    #[test]
    fn test_invalidate_from_leaves_earlier_lines() {
        let mut manager = IncrementalManager::new();
        manager.set_line_count(3);
        manager.update_line(0, "top", 1);
        manager.invalidate_from(1);

        assert!(!manager.update_line(0, "top", 1));
        assert_eq!(manager.get_initial_state_id(1), 1);
    }

    #[test]
    fn test_initial_state_id() {
        let mut manager = IncrementalManager::new();
        manager.set_line_count(2);
        manager.update_line(0, "first", 5);

        assert_eq!(manager.get_initial_state_id(0), EMPTY_STATE);
        assert_eq!(manager.get_initial_state_id(1), 5);
        assert_eq!(manager.get_initial_state_id(99), EMPTY_STATE);
    }

    #[test]
    fn test_resize_and_clear() {
        let mut manager = IncrementalManager::new();
        manager.set_line_count(5);
        manager.update_line(4, "tail", 9);

        manager.set_line_count(2);
        assert_eq!(manager.line_count(), 2);
        assert!(manager.update_line(4, "tail", 9), "out of range is a change");

        manager.set_line_count(5);
        assert!(manager.update_line(4, "tail", 9), "regrown entries are unknown");

        manager.clear();
        assert_eq!(manager.line_count(), 0);
    }

    #[test]
    fn test_out_of_range_update_reports_change() {
        let mut manager = IncrementalManager::new();
        assert!(manager.update_line(0, "anything", 0));
    }
}
