// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Text change descriptions driving incremental re-highlighting.
//!
//! The owning editor reports edits as [`TextChange`] values; the
//! highlighter uses them to decide which cache entries to invalidate.

/// Description of an edit to the highlighted document.
#[derive(Debug, Clone)]
pub struct TextChange {
    /// The line number where the change started
    pub start_line: usize,
    /// The line number where the change ended
    pub end_line: usize,
    /// The number of lines that were added (positive) or removed (negative)
    pub line_delta: isize,
    /// The kind of change that occurred
    pub kind: ChangeKind,
}

/// Kind of text change that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Text was inserted
    Insert,
    /// Text was deleted
    Delete,
    /// Text was replaced
    Replace,
    /// Multiple changes occurred (e.g., undo/redo)
    Multiple,
}

impl TextChange {
    pub fn new(start_line: usize, end_line: usize, line_delta: isize, kind: ChangeKind) -> Self {
        Self { start_line, end_line, line_delta, kind }
    }

    /// A change confined to one line, with no lines added or removed.
    pub fn single_line(line: usize, kind: ChangeKind) -> Self {
        Self::new(line, line, 0, kind)
    }

    pub fn insert(start_line: usize, lines_added: usize) -> Self {
        Self::new(
            start_line,
            start_line + lines_added,
            lines_added as isize,
            ChangeKind::Insert,
        )
    }

    pub fn delete(start_line: usize, lines_deleted: usize) -> Self {
        Self::new(start_line, start_line, -(lines_deleted as isize), ChangeKind::Delete)
    }

    pub fn replace(start_line: usize, end_line: usize, line_delta: isize) -> Self {
        Self::new(start_line, end_line, line_delta, ChangeKind::Replace)
    }
}
