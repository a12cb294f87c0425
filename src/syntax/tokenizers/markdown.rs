// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Markdown tokenizer with fenced code blocks.
//!
//! A fence line (three or more backticks, optional language tag) pushes a
//! frame for the named language; its end condition is the exact fence
//! string, and the closing fence must prefix-extend it. Inline parsing is
//! first-match-wins left-to-right with no nesting resolution.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::types::{StackFrame, StateStack, StyleId, Token, TokenizeResult};

pub(crate) const STATE_CODE_BLOCK: u8 = 1;

static FENCE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(`{3,})(\w*)$").unwrap());
static HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s").unwrap());
static LIST_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)([-*]|\d+\.)\s").unwrap());
static BLOCKQUOTE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(>\s*)+").unwrap());

#[derive(Debug, Default)]
pub struct MarkdownTokenizer;

impl MarkdownTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn tokenize_in_code_block(
        &self,
        line: &str,
        stack: StateStack,
        frame: &StackFrame,
    ) -> TokenizeResult {
        let stripped = line.trim_end();

        if let Some(captures) = FENCE_PATTERN.captures(stripped) {
            let fence = captures.get(1).map_or("", |m| m.as_str());
            let closes = frame
                .end_condition
                .as_deref()
                .is_some_and(|opener| fence.starts_with(opener));
            if closes {
                let tokens =
                    vec![Token::new(0, stripped.chars().count(), StyleId::Punctuation)];
                let stack = if stack.len() > 1 { stack.popped() } else { stack };
                return TokenizeResult::new(tokens, stack);
            }
        }

        let length = line.chars().count();
        let tokens = if length > 0 {
            vec![Token::new(0, length, StyleId::Embedded)]
        } else {
            Vec::new()
        };
        TokenizeResult::new(tokens, stack)
    }

    fn tokenize_default(&self, line: &str, stack: StateStack) -> TokenizeResult {
        let n = line.chars().count();
        let stripped = line.trim_end();
        let mut tokens = Vec::new();

        if let Some(captures) = FENCE_PATTERN.captures(stripped) {
            let fence = captures.get(1).map_or("", |m| m.as_str());
            let language = match captures.get(2).map(|m| m.as_str()) {
                Some("") | None => "code",
                Some(lang) => lang,
            };
            tokens.push(Token::new(0, stripped.chars().count(), StyleId::Punctuation));
            let stack = stack.pushed(StackFrame::new(language, STATE_CODE_BLOCK, Some(fence)));
            return TokenizeResult::new(tokens, stack);
        }

        if HEADER_PATTERN.is_match(line) {
            tokens.push(Token::new(0, n, StyleId::Keyword));
            return TokenizeResult::new(tokens, stack);
        }

        if BLOCKQUOTE_PATTERN.is_match(line) {
            tokens.push(Token::new(0, n, StyleId::Comment));
            return TokenizeResult::new(tokens, stack);
        }

        if let Some(m) = LIST_PATTERN.find(line) {
            let marker_chars = line[..m.end()].chars().count();
            tokens.push(Token::new(0, marker_chars, StyleId::Punctuation));
            if marker_chars < n {
                let chars: Vec<char> = line.chars().collect();
                tokenize_inline(&chars, marker_chars, n, &mut tokens);
            }
            return TokenizeResult::new(tokens, stack);
        }

        let chars: Vec<char> = line.chars().collect();
        tokenize_inline(&chars, 0, n, &mut tokens);
        TokenizeResult::new(tokens, stack)
    }
}

impl Tokenizer for MarkdownTokenizer {
    fn lang_id(&self) -> &'static str {
        "markdown"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        let stack = if stack.is_empty() {
            StateStack::single(self.default_frame())
        } else {
            stack.clone()
        };

        let frame = stack.top().cloned().unwrap_or_else(|| self.default_frame());
        if frame.sub_state == STATE_CODE_BLOCK {
            return self.tokenize_in_code_block(line, stack, &frame);
        }
        self.tokenize_default(line, stack)
    }
}

/// Inline markdown parsing: code spans, bold, italic, links. First match
/// wins, scanning left to right.
fn tokenize_inline(chars: &[char], start: usize, end: usize, tokens: &mut Vec<Token>) {
    let mut i = start;

    while i < end {
        let ch = chars[i];

        if ch == '`' {
            if let Some(close) = find_char(chars, i + 1, end, '`') {
                tokens.push(Token::new(i, close - i + 1, StyleId::String));
                i = close + 1;
                continue;
            }
            i += 1;
            continue;
        }

        if ch == '*' && i + 1 < end && chars[i + 1] == '*' {
            if let Some(close) = find_pair(chars, i + 2, end, '*') {
                tokens.push(Token::new(i, close - i + 2, StyleId::Keyword));
                i = close + 2;
                continue;
            }
            i += 1;
            continue;
        }

        if ch == '_' && i + 1 < end && chars[i + 1] == '_' {
            if let Some(close) = find_pair(chars, i + 2, end, '_') {
                tokens.push(Token::new(i, close - i + 2, StyleId::Keyword));
                i = close + 2;
                continue;
            }
            i += 1;
            continue;
        }

        if ch == '*' && i + 1 < end && chars[i + 1] != '*' {
            if let Some(close) = find_single_marker(chars, i + 1, end, '*') {
                tokens.push(Token::new(i, close - i + 1, StyleId::Comment));
                i = close + 1;
                continue;
            }
            i += 1;
            continue;
        }

        if ch == '_' && i + 1 < end && chars[i + 1] != '_' {
            // Underscore emphasis only at a word boundary on both sides.
            if i == start || !chars[i - 1].is_alphanumeric() {
                if let Some(close) = find_single_marker(chars, i + 1, end, '_') {
                    if close + 1 >= end || !chars[close + 1].is_alphanumeric() {
                        tokens.push(Token::new(i, close - i + 1, StyleId::Comment));
                        i = close + 1;
                        continue;
                    }
                }
            }
            i += 1;
            continue;
        }

        if ch == '[' {
            if let Some(next) = parse_link(chars, i, end, tokens) {
                i = next;
                continue;
            }
            i += 1;
            continue;
        }

        i += 1;
    }
}

fn find_char(chars: &[char], start: usize, end: usize, target: char) -> Option<usize> {
    (start..end.min(chars.len())).find(|&i| chars[i] == target)
}

/// Position of the next doubled `marker` (e.g. `**`) at or after `start`.
fn find_pair(chars: &[char], start: usize, end: usize, marker: char) -> Option<usize> {
    let mut i = start;
    while i + 1 < end {
        if chars[i] == marker && chars[i + 1] == marker {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Position of the next single `marker`, skipping doubled occurrences.
fn find_single_marker(chars: &[char], start: usize, end: usize, marker: char) -> Option<usize> {
    let mut i = start;
    while i < end {
        if chars[i] == marker {
            if i + 1 < end && chars[i + 1] == marker {
                i += 2;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Decomposes `[text](url)` starting at `start`. Returns the position past
/// the closing paren, or `None` if the shape does not match.
fn parse_link(
    chars: &[char],
    start: usize,
    end: usize,
    tokens: &mut Vec<Token>,
) -> Option<usize> {
    if chars[start] != '[' {
        return None;
    }

    let bracket_close = find_char(chars, start + 1, end, ']')?;
    if bracket_close + 1 >= end || chars[bracket_close + 1] != '(' {
        return None;
    }
    let paren_close = find_char(chars, bracket_close + 2, end, ')')?;

    tokens.push(Token::new(start, 1, StyleId::Punctuation));
    let text_len = bracket_close - (start + 1);
    if text_len > 0 {
        tokens.push(Token::new(start + 1, text_len, StyleId::AttrName));
    }
    tokens.push(Token::new(bracket_close, 1, StyleId::Punctuation));
    tokens.push(Token::new(bracket_close + 1, 1, StyleId::Punctuation));
    let url_len = paren_close - (bracket_close + 2);
    if url_len > 0 {
        tokens.push(Token::new(bracket_close + 2, url_len, StyleId::String));
    }
    tokens.push(Token::new(paren_close, 1, StyleId::Punctuation));

    Some(paren_close + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_block_stack(lang: &str, fence: &str) -> StateStack {
        StateStack::single(StackFrame::default_for("markdown"))
            .pushed(StackFrame::new(lang, STATE_CODE_BLOCK, Some(fence)))
    }

    #[test]
    fn test_fence_pushes_code_block_frame() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("```python", &StateStack::empty());

        assert!(result.final_stack.len() > 1);
        let top = result.final_stack.top().unwrap();
        assert_eq!(top.lang_id, "python");
        assert_eq!(top.sub_state, STATE_CODE_BLOCK);
        assert_eq!(top.end_condition.as_deref(), Some("```"));
        assert_eq!(result.tokens[0], Token::new(0, 9, StyleId::Punctuation));
    }

    #[test]
    fn test_unnamed_fence_uses_code_language() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("````", &StateStack::empty());

        let top = result.final_stack.top().unwrap();
        assert_eq!(top.lang_id, "code");
        assert_eq!(top.end_condition.as_deref(), Some("````"));
    }

    #[test]
    fn test_code_block_content_is_embedded() {
        let tokenizer = MarkdownTokenizer::new();
        let stack = code_block_stack("python", "```");
        let result = tokenizer.tokenize_line("def foo():", &stack);

        assert_eq!(result.tokens[0], Token::new(0, 10, StyleId::Embedded));
        assert_eq!(result.final_stack, stack);
    }

    #[test]
    fn test_fence_close_pops() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("```", &code_block_stack("python", "```"));

        assert_eq!(result.final_stack.len(), 1);
        assert_eq!(result.final_stack.top().unwrap().lang_id, "markdown");
        assert_eq!(result.tokens[0].style, StyleId::Punctuation);
    }

    #[test]
    fn test_longer_fence_closes_shorter_opener() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("`````", &code_block_stack("rust", "```"));
        assert_eq!(result.final_stack.len(), 1);
    }

    #[test]
    fn test_shorter_fence_does_not_close() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("```", &code_block_stack("rust", "````"));

        assert_eq!(result.final_stack.len(), 2);
        assert_eq!(result.tokens[0].style, StyleId::Embedded);
    }

    #[test]
    fn test_headers_and_blockquotes() {
        let tokenizer = MarkdownTokenizer::new();

        let header = tokenizer.tokenize_line("## Title", &StateStack::empty());
        assert_eq!(header.tokens, vec![Token::new(0, 8, StyleId::Keyword)]);

        let quote = tokenizer.tokenize_line("> quoted text", &StateStack::empty());
        assert_eq!(quote.tokens, vec![Token::new(0, 13, StyleId::Comment)]);

        let not_header = tokenizer.tokenize_line("####### seven", &StateStack::empty());
        assert!(not_header.tokens.iter().all(|t| t.style != StyleId::Keyword));
    }

    #[test]
    fn test_list_marker_then_inline() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("- item with `code`", &StateStack::empty());

        assert_eq!(result.tokens[0], Token::new(0, 2, StyleId::Punctuation));
        assert!(result.tokens.contains(&Token::new(12, 6, StyleId::String)));

        let numbered = tokenizer.tokenize_line("12. item", &StateStack::empty());
        assert_eq!(numbered.tokens[0], Token::new(0, 4, StyleId::Punctuation));
    }

    #[test]
    fn test_inline_emphasis() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("**bold** and *slant* and _u_", &StateStack::empty());

        assert_eq!(result.tokens[0], Token::new(0, 8, StyleId::Keyword));
        assert_eq!(result.tokens[1], Token::new(13, 7, StyleId::Comment));
        assert_eq!(result.tokens[2], Token::new(25, 3, StyleId::Comment));
    }

    #[test]
    fn test_underscore_inside_word_is_not_emphasis() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("snake_case_name here", &StateStack::empty());
        assert!(result.tokens.is_empty());
    }

    #[test]
    fn test_link_decomposition() {
        let tokenizer = MarkdownTokenizer::new();
        let result = tokenizer.tokenize_line("[docs](http://x)", &StateStack::empty());

        assert_eq!(result.tokens[0], Token::new(0, 1, StyleId::Punctuation));
        assert_eq!(result.tokens[1], Token::new(1, 4, StyleId::AttrName));
        assert_eq!(result.tokens[2], Token::new(5, 1, StyleId::Punctuation));
        assert_eq!(result.tokens[3], Token::new(6, 1, StyleId::Punctuation));
        assert_eq!(result.tokens[4], Token::new(7, 8, StyleId::String));
        assert_eq!(result.tokens[5], Token::new(15, 1, StyleId::Punctuation));
    }

    #[test]
    fn test_empty_line_in_code_block() {
        let tokenizer = MarkdownTokenizer::new();
        let stack = code_block_stack("python", "```");
        let result = tokenizer.tokenize_line("", &stack);
        assert!(result.tokens.is_empty());
        assert_eq!(result.final_stack, stack);
    }
}
