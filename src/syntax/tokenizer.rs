// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The per-language tokenizer contract.

use crate::syntax::types::{StackFrame, StateStack, TokenizeResult};

/// A pure per-line lexer for one language.
///
/// Implementations must be deterministic given `(line, stack)`: no reliance
/// on other lines, wall-clock time, or hidden counters. The returned tokens
/// are sorted by start offset and non-overlapping; the final stack either
/// matches the incoming stack's shape or differs by a push, pop, or
/// replacement of the innermost frame(s). Unterminated constructs are the
/// designed trigger for pushing a carry-over frame, never an error.
pub trait Tokenizer {
    /// The language identifier, e.g. `"python"` or `"html"`.
    fn lang_id(&self) -> &'static str;

    /// Tokenizes one line given the lexical state carried from the
    /// previous line.
    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult;

    /// The default frame for this language (sub-state 0, no end
    /// condition).
    fn default_frame(&self) -> StackFrame {
        StackFrame::default_for(self.lang_id())
    }
}
