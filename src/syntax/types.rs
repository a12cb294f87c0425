// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared value types for the tokenization engine.
//!
//! All types here are plain values: created fresh per call, compared by
//! content, safe to share or discard freely. Token offsets are Unicode
//! scalar value (char) counts, matching the per-line cursor coordinates of
//! a host text widget.

/// Style categories a tokenizer can assign to a span of text.
///
/// This is a closed set; the style registry maps each variant to a
/// renderable format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleId {
    Plain,
    Keyword,
    String,
    Comment,
    Number,
    Operator,
    Tag,
    AttrName,
    AttrValue,
    Punctuation,
    Identifier,
    Embedded,
}

impl StyleId {
    /// Every style category, in table order.
    pub const ALL: [StyleId; 12] = [
        StyleId::Plain,
        StyleId::Keyword,
        StyleId::String,
        StyleId::Comment,
        StyleId::Number,
        StyleId::Operator,
        StyleId::Tag,
        StyleId::AttrName,
        StyleId::AttrValue,
        StyleId::Punctuation,
        StyleId::Identifier,
        StyleId::Embedded,
    ];

    /// Dense index for fixed-size table lookups.
    pub fn index(self) -> usize {
        match self {
            StyleId::Plain => 0,
            StyleId::Keyword => 1,
            StyleId::String => 2,
            StyleId::Comment => 3,
            StyleId::Number => 4,
            StyleId::Operator => 5,
            StyleId::Tag => 6,
            StyleId::AttrName => 7,
            StyleId::AttrValue => 8,
            StyleId::Punctuation => 9,
            StyleId::Identifier => 10,
            StyleId::Embedded => 11,
        }
    }
}

/// A styled span within one line.
///
/// Line-scoped and never retained past the `tokenize_line` call that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Offset of the first char of the span.
    pub start: usize,
    /// Number of chars covered.
    pub length: usize,
    /// Style category for the span.
    pub style: StyleId,
}

impl Token {
    pub fn new(start: usize, length: usize, style: StyleId) -> Self {
        Self { start, length, style }
    }
}

/// One nested lexical context.
///
/// Examples: "inside language `javascript` until `</script>`", "inside a
/// triple-quoted string" (sub-state encodes which delimiter), "inside a
/// fenced code block whose closing fence must extend the opener".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackFrame {
    /// Language id of the tokenizer this frame belongs to.
    pub lang_id: String,
    /// Tokenizer-private sub-state discriminant.
    pub sub_state: u8,
    /// Closing marker the pushing language is waiting for, if any.
    pub end_condition: Option<String>,
}

impl StackFrame {
    pub fn new(lang_id: &str, sub_state: u8, end_condition: Option<&str>) -> Self {
        Self {
            lang_id: lang_id.to_string(),
            sub_state,
            end_condition: end_condition.map(str::to_string),
        }
    }

    /// The default (sub-state 0, no end condition) frame for a language.
    pub fn default_for(lang_id: &str) -> Self {
        Self::new(lang_id, 0, None)
    }
}

/// An ordered, possibly-empty sequence of stack frames, outermost first.
///
/// Stacks are values: `pushed`, `popped` and `with_top` allocate a new
/// stack rather than mutating, since old stack values may still be
/// referenced by the interning pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StateStack {
    frames: Vec<StackFrame>,
}

impl StateStack {
    /// The empty stack (the "start of document" condition).
    pub fn empty() -> Self {
        Self::default()
    }

    /// A stack holding a single frame.
    pub fn single(frame: StackFrame) -> Self {
        Self { frames: vec![frame] }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// The innermost frame, if any.
    pub fn top(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// A new stack with `frame` pushed on top.
    pub fn pushed(&self, frame: StackFrame) -> StateStack {
        let mut frames = self.frames.clone();
        frames.push(frame);
        StateStack { frames }
    }

    /// A new stack with the top frame removed. Popping the empty stack
    /// yields the empty stack.
    pub fn popped(&self) -> StateStack {
        let mut frames = self.frames.clone();
        frames.pop();
        StateStack { frames }
    }

    /// A new stack with the top frame replaced. Replacing on the empty
    /// stack yields a single-frame stack.
    pub fn with_top(&self, frame: StackFrame) -> StateStack {
        let mut frames = self.frames.clone();
        frames.pop();
        frames.push(frame);
        StateStack { frames }
    }
}

/// The output of tokenizing one line.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizeResult {
    /// Styled spans, sorted by `start`, non-overlapping.
    pub tokens: Vec<Token>,
    /// Lexical state to carry into the next line.
    pub final_stack: StateStack,
}

impl TokenizeResult {
    pub fn new(tokens: Vec<Token>, final_stack: StateStack) -> Self {
        Self { tokens, final_stack }
    }
}
