// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HTML tokenizer with JavaScript and CSS embedding.
//!
//! Sub-states: default, inside a tag, inside a comment. An opening
//! `<script>`/`<style>` tag records a pending embed on the current frame;
//! consuming the tag's `>` (not `/>`) promotes it into a pushed frame for
//! `javascript`/`css` with the matching close tag as end condition. While
//! a foreign frame is on top, content is styled EMBEDDED until the closing
//! tag text is found (ASCII-case-insensitively), which pops the frame.

use crate::syntax::scan::{matches_at, matches_at_ignore_case, slice_to_string};
use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::types::{StackFrame, StateStack, StyleId, Token, TokenizeResult};

const STATE_DEFAULT: u8 = 0;
const STATE_IN_TAG: u8 = 1;
const STATE_IN_COMMENT: u8 = 2;

const PENDING_PREFIX: &str = "pending:";

#[derive(Debug, Default)]
pub struct HtmlTokenizer;

impl HtmlTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn tokenize_default(
        &self,
        chars: &[char],
        mut pos: usize,
        tokens: &mut Vec<Token>,
        stack: StateStack,
    ) -> (usize, StateStack) {
        let length = chars.len();

        if matches_at(chars, pos, "<!--") {
            tokens.push(Token::new(pos, 4, StyleId::Comment));
            return (pos + 4, update_sub_state(&stack, STATE_IN_COMMENT));
        }

        if chars[pos] == '<' {
            if pos + 1 < length && chars[pos + 1] == '/' {
                let start = pos;
                pos += 2;
                let name_end = tag_name_end(chars, pos);
                if name_end > pos {
                    pos = name_end;
                    tokens.push(Token::new(start, pos - start, StyleId::Tag));
                } else {
                    tokens.push(Token::new(start, 2, StyleId::Tag));
                }
                return (pos, update_sub_state(&stack, STATE_IN_TAG));
            }

            let start = pos;
            pos += 1;
            let name_end = tag_name_end(chars, pos);
            let mut stack = stack;
            if name_end > pos {
                let tag_name: String =
                    slice_to_string(chars, pos, name_end).to_ascii_lowercase();
                pos = name_end;
                tokens.push(Token::new(start, pos - start, StyleId::Tag));
                if tag_name == "script" {
                    stack = set_pending_embed(&stack, "javascript");
                } else if tag_name == "style" {
                    stack = set_pending_embed(&stack, "css");
                }
            } else {
                tokens.push(Token::new(start, 1, StyleId::Tag));
            }
            return (pos, update_sub_state(&stack, STATE_IN_TAG));
        }

        if let Some(entity_len) = entity_len(chars, pos) {
            tokens.push(Token::new(pos, entity_len, StyleId::Keyword));
            return (pos + entity_len, stack);
        }

        (pos + 1, stack)
    }

    fn tokenize_in_tag(
        &self,
        chars: &[char],
        mut pos: usize,
        tokens: &mut Vec<Token>,
        stack: StateStack,
    ) -> (usize, StateStack) {
        let length = chars.len();

        while pos < length && matches!(chars[pos], ' ' | '\t' | '\n' | '\r') {
            pos += 1;
        }
        if pos >= length {
            return (pos, stack);
        }

        if matches_at(chars, pos, "/>") {
            tokens.push(Token::new(pos, 2, StyleId::Tag));
            let stack = clear_pending_embed(&stack);
            return (pos + 2, update_sub_state(&stack, STATE_DEFAULT));
        }

        if chars[pos] == '>' {
            tokens.push(Token::new(pos, 1, StyleId::Tag));
            pos += 1;
            let pending = pending_embed(&stack);
            let stack = clear_pending_embed(&stack);
            let mut stack = update_sub_state(&stack, STATE_DEFAULT);
            match pending.as_deref() {
                Some("javascript") => {
                    stack = stack.pushed(StackFrame::new("javascript", STATE_DEFAULT, Some("</script>")));
                }
                Some("css") => {
                    stack = stack.pushed(StackFrame::new("css", STATE_DEFAULT, Some("</style>")));
                }
                _ => {}
            }
            return (pos, stack);
        }

        let attr_end = attr_name_end(chars, pos);
        if attr_end > pos {
            let mut next_pos = attr_end;
            while next_pos < length && matches!(chars[next_pos], ' ' | '\t') {
                next_pos += 1;
            }
            if next_pos < length && chars[next_pos] == '=' {
                tokens.push(Token::new(pos, attr_end - pos, StyleId::AttrName));
                pos = next_pos + 1;
                while pos < length && matches!(chars[pos], ' ' | '\t') {
                    pos += 1;
                }
                if pos < length && matches!(chars[pos], '"' | '\'') {
                    let quote = chars[pos];
                    let start = pos;
                    pos += 1;
                    while pos < length && chars[pos] != quote {
                        pos += 1;
                    }
                    if pos < length {
                        pos += 1;
                    }
                    tokens.push(Token::new(start, pos - start, StyleId::AttrValue));
                }
                return (pos, stack);
            }
            tokens.push(Token::new(pos, attr_end - pos, StyleId::AttrName));
            return (attr_end, stack);
        }

        (pos + 1, stack)
    }

    fn tokenize_comment(
        &self,
        chars: &[char],
        mut pos: usize,
        tokens: &mut Vec<Token>,
        stack: StateStack,
    ) -> (usize, StateStack) {
        let start = pos;
        let length = chars.len();

        while pos < length {
            if matches_at(chars, pos, "-->") {
                pos += 3;
                tokens.push(Token::new(start, pos - start, StyleId::Comment));
                return (pos, update_sub_state(&stack, STATE_DEFAULT));
            }
            pos += 1;
        }

        if pos > start {
            tokens.push(Token::new(start, pos - start, StyleId::Comment));
        }
        (pos, stack)
    }

    fn tokenize_embedded(
        &self,
        chars: &[char],
        mut pos: usize,
        tokens: &mut Vec<Token>,
        stack: StateStack,
        end_tag: &str,
    ) -> (usize, StateStack) {
        let start = pos;
        let length = chars.len();
        let end_tag_len = end_tag.chars().count();

        while pos < length {
            if matches_at_ignore_case(chars, pos, end_tag) {
                if pos > start {
                    tokens.push(Token::new(start, pos - start, StyleId::Embedded));
                }
                let stack = stack.popped();
                let tag_start = pos;
                pos += end_tag_len;
                tokens.push(Token::new(tag_start, pos - tag_start, StyleId::Tag));
                return (pos, update_sub_state(&stack, STATE_IN_TAG));
            }
            pos += 1;
        }

        if pos > start {
            tokens.push(Token::new(start, pos - start, StyleId::Embedded));
        }
        (pos, stack)
    }
}

impl Tokenizer for HtmlTokenizer {
    fn lang_id(&self) -> &'static str {
        "html"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        let chars: Vec<char> = line.chars().collect();
        let length = chars.len();
        let mut tokens = Vec::new();

        let mut stack = if stack.is_empty() {
            StateStack::single(self.default_frame())
        } else {
            stack.clone()
        };

        let mut pos = 0;
        while pos < length {
            let frame = match stack.top() {
                Some(frame) => frame.clone(),
                None => {
                    stack = StateStack::single(self.default_frame());
                    self.default_frame()
                }
            };

            let step = if frame.lang_id != "html" {
                let end_tag = frame.end_condition.as_deref().unwrap_or("</script>").to_string();
                self.tokenize_embedded(&chars, pos, &mut tokens, stack, &end_tag)
            } else if frame.sub_state == STATE_IN_COMMENT {
                self.tokenize_comment(&chars, pos, &mut tokens, stack)
            } else if frame.sub_state == STATE_IN_TAG {
                self.tokenize_in_tag(&chars, pos, &mut tokens, stack)
            } else {
                self.tokenize_default(&chars, pos, &mut tokens, stack)
            };
            pos = step.0;
            stack = step.1;
        }

        TokenizeResult::new(tokens, stack)
    }
}

/// End of a `[a-zA-Z][a-zA-Z0-9-]*` run starting at `pos`, or `pos` if
/// none.
fn tag_name_end(chars: &[char], pos: usize) -> usize {
    let mut end = pos;
    if end < chars.len() && chars[end].is_ascii_alphabetic() {
        end += 1;
        while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '-') {
            end += 1;
        }
    }
    end
}

/// End of a `[a-zA-Z_:][a-zA-Z0-9_:\-.]*` run starting at `pos`, or `pos`
/// if none.
fn attr_name_end(chars: &[char], pos: usize) -> usize {
    let mut end = pos;
    if end < chars.len() && (chars[end].is_ascii_alphabetic() || matches!(chars[end], '_' | ':')) {
        end += 1;
        while end < chars.len()
            && (chars[end].is_ascii_alphanumeric() || matches!(chars[end], '_' | ':' | '-' | '.'))
        {
            end += 1;
        }
    }
    end
}

/// Length of an HTML entity (`&name;`, `&#NN;`, `&#xHH;`) at `pos`.
fn entity_len(chars: &[char], pos: usize) -> Option<usize> {
    if chars.get(pos) != Some(&'&') {
        return None;
    }
    let mut i = pos + 1;
    if chars.get(i) == Some(&'#') {
        i += 1;
        let hex = chars.get(i) == Some(&'x');
        if hex {
            i += 1;
        }
        let digits_start = i;
        while i < chars.len()
            && (if hex { chars[i].is_ascii_hexdigit() } else { chars[i].is_ascii_digit() })
        {
            i += 1;
        }
        if i == digits_start {
            return None;
        }
    } else {
        let name_start = i;
        while i < chars.len() && chars[i].is_ascii_alphabetic() {
            i += 1;
        }
        if i == name_start {
            return None;
        }
    }
    if chars.get(i) == Some(&';') { Some(i + 1 - pos) } else { None }
}

fn update_sub_state(stack: &StateStack, sub_state: u8) -> StateStack {
    match stack.top() {
        Some(frame) => stack.with_top(StackFrame {
            lang_id: frame.lang_id.clone(),
            sub_state,
            end_condition: frame.end_condition.clone(),
        }),
        None => StateStack::single(StackFrame::new("html", sub_state, None)),
    }
}

fn set_pending_embed(stack: &StateStack, embed: &str) -> StateStack {
    let pending = format!("{PENDING_PREFIX}{embed}");
    match stack.top() {
        Some(frame) => stack.with_top(StackFrame {
            lang_id: frame.lang_id.clone(),
            sub_state: frame.sub_state,
            end_condition: Some(pending),
        }),
        None => StateStack::single(StackFrame::new("html", STATE_IN_TAG, Some(&pending))),
    }
}

fn pending_embed(stack: &StateStack) -> Option<String> {
    let frame = stack.top()?;
    let end = frame.end_condition.as_deref()?;
    end.strip_prefix(PENDING_PREFIX).map(str::to_string)
}

fn clear_pending_embed(stack: &StateStack) -> StateStack {
    match stack.top() {
        Some(frame)
            if frame
                .end_condition
                .as_deref()
                .is_some_and(|end| end.starts_with(PENDING_PREFIX)) =>
        {
            stack.with_top(StackFrame {
                lang_id: frame.lang_id.clone(),
                sub_state: frame.sub_state,
                end_condition: None,
            })
        }
        _ => stack.clone(),
    }
}
