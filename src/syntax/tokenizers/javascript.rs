// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! JavaScript tokenizer.
//!
//! Two multi-line constructs: block comments and template literals, each
//! with its own sub-state. Regex literals are disambiguated from division
//! by the style of the preceding token.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::syntax::scan::{matches_at, slice_to_string};
use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::types::{StackFrame, StateStack, StyleId, Token, TokenizeResult};

const STATE_DEFAULT: u8 = 0;
pub(crate) const STATE_BLOCK_COMMENT: u8 = 1;
pub(crate) const STATE_TEMPLATE_STRING: u8 = 2;

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default",
        "delete", "do", "else", "export", "extends", "finally", "for", "function", "if",
        "import", "in", "instanceof", "let", "new", "return", "super", "switch", "this",
        "throw", "try", "typeof", "var", "void", "while", "with", "yield", "async",
        "await", "of", "true", "false", "null", "undefined",
    ]
    .into_iter()
    .collect()
});

static OPERATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "+", "-", "*", "/", "%", "**", "=", "==", "===", "!=", "!==", "<", ">", "<=",
        ">=", "&", "|", "^", "~", "<<", ">>", ">>>", "&&", "||", "??", "!", "+=", "-=",
        "*=", "/=", "%=", "**=", "&=", "|=", "^=", "<<=", ">>=", ">>>=", "&&=", "||=",
        "??=", "++", "--", "=>", "?", ":",
    ]
    .into_iter()
    .collect()
});

fn is_punctuation(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']' | '{' | '}' | ',' | '.' | ';')
}

#[derive(Debug, Default)]
pub struct JavaScriptTokenizer;

impl JavaScriptTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for JavaScriptTokenizer {
    fn lang_id(&self) -> &'static str {
        "javascript"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        let chars: Vec<char> = line.chars().collect();
        let n = chars.len();
        let mut tokens = Vec::new();
        let mut stack = stack.clone();
        let mut i = 0;

        let sub_state = match stack.top() {
            Some(frame) if frame.lang_id == "javascript" => frame.sub_state,
            _ => STATE_DEFAULT,
        };

        if sub_state == STATE_BLOCK_COMMENT {
            let (next, closed) = continue_block_comment(&chars, &mut tokens);
            if closed {
                stack = stack.popped();
            }
            if next >= n {
                return TokenizeResult::new(tokens, stack);
            }
            i = next;
        } else if sub_state == STATE_TEMPLATE_STRING {
            let (next, closed) = continue_template_string(&chars, &mut tokens);
            if closed {
                stack = stack.popped();
            }
            if next >= n {
                return TokenizeResult::new(tokens, stack);
            }
            i = next;
        }

        while i < n {
            let ch = chars[i];

            if matches!(ch, ' ' | '\t' | '\r' | '\n') {
                i += 1;
                continue;
            }

            if matches_at(&chars, i, "//") {
                tokens.push(Token::new(i, n - i, StyleId::Comment));
                break;
            }

            if matches_at(&chars, i, "/*") {
                let start = i;
                i += 2;
                let mut closed = false;
                while i < n {
                    if matches_at(&chars, i, "*/") {
                        i += 2;
                        tokens.push(Token::new(start, i - start, StyleId::Comment));
                        closed = true;
                        break;
                    }
                    i += 1;
                }
                if !closed {
                    tokens.push(Token::new(start, n - start, StyleId::Comment));
                    stack =
                        stack.pushed(StackFrame::new("javascript", STATE_BLOCK_COMMENT, None));
                    i = n;
                }
                continue;
            }

            if ch == '`' {
                let start = i;
                i += 1;
                let mut closed = false;
                while i < n {
                    if chars[i] == '\\' && i + 1 < n {
                        i += 2;
                        continue;
                    }
                    if chars[i] == '`' {
                        i += 1;
                        tokens.push(Token::new(start, i - start, StyleId::String));
                        closed = true;
                        break;
                    }
                    i += 1;
                }
                if !closed {
                    tokens.push(Token::new(start, n - start, StyleId::String));
                    stack =
                        stack.pushed(StackFrame::new("javascript", STATE_TEMPLATE_STRING, None));
                    i = n;
                }
                continue;
            }

            if ch == '"' || ch == '\'' {
                let quote = ch;
                let start = i;
                i += 1;
                while i < n {
                    if chars[i] == '\\' && i + 1 < n {
                        i += 2;
                    } else if chars[i] == quote {
                        i += 1;
                        break;
                    } else {
                        i += 1;
                    }
                }
                tokens.push(Token::new(start, i - start, StyleId::String));
                continue;
            }

            if ch == '/' && can_start_regex(&tokens) {
                if let Some(length) = try_parse_regex(&chars, i) {
                    tokens.push(Token::new(i, length, StyleId::String));
                    i += length;
                    continue;
                }
            }

            if ch.is_ascii_digit() || (ch == '.' && i + 1 < n && chars[i + 1].is_ascii_digit()) {
                let start = i;
                if matches!((chars[i], chars.get(i + 1)), ('0', Some('x' | 'X'))) {
                    i += 2;
                    while i < n && (chars[i].is_ascii_hexdigit() || chars[i] == '_') {
                        i += 1;
                    }
                } else if matches!((chars[i], chars.get(i + 1)), ('0', Some('b' | 'B'))) {
                    i += 2;
                    while i < n && matches!(chars[i], '0' | '1' | '_') {
                        i += 1;
                    }
                } else if matches!((chars[i], chars.get(i + 1)), ('0', Some('o' | 'O'))) {
                    i += 2;
                    while i < n && matches!(chars[i], '0'..='7' | '_') {
                        i += 1;
                    }
                } else {
                    while i < n && (chars[i].is_ascii_digit() || chars[i] == '_') {
                        i += 1;
                    }
                    if i < n && chars[i] == '.' {
                        i += 1;
                        while i < n && (chars[i].is_ascii_digit() || chars[i] == '_') {
                            i += 1;
                        }
                    }
                    if i < n && matches!(chars[i], 'e' | 'E') {
                        i += 1;
                        if i < n && matches!(chars[i], '+' | '-') {
                            i += 1;
                        }
                        while i < n && (chars[i].is_ascii_digit() || chars[i] == '_') {
                            i += 1;
                        }
                    }
                }
                // BigInt literals.
                if i < n && chars[i] == 'n' {
                    i += 1;
                }
                tokens.push(Token::new(start, i - start, StyleId::Number));
                continue;
            }

            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                let start = i;
                while i < n && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$')
                {
                    i += 1;
                }
                let word = slice_to_string(&chars, start, i);
                let style = if KEYWORDS.contains(word.as_str()) {
                    StyleId::Keyword
                } else {
                    StyleId::Identifier
                };
                tokens.push(Token::new(start, i - start, style));
                continue;
            }

            let mut matched = false;
            for width in (1..=4usize).rev() {
                if i + width <= n {
                    let candidate = slice_to_string(&chars, i, i + width);
                    if OPERATORS.contains(candidate.as_str()) {
                        tokens.push(Token::new(i, width, StyleId::Operator));
                        i += width;
                        matched = true;
                        break;
                    }
                }
            }
            if matched {
                continue;
            }

            if is_punctuation(ch) {
                tokens.push(Token::new(i, 1, StyleId::Punctuation));
                i += 1;
                continue;
            }

            i += 1;
        }

        TokenizeResult::new(tokens, stack)
    }
}

fn continue_block_comment(chars: &[char], tokens: &mut Vec<Token>) -> (usize, bool) {
    let n = chars.len();
    let mut i = 0;
    while i < n {
        if matches_at(chars, i, "*/") {
            i += 2;
            tokens.push(Token::new(0, i, StyleId::Comment));
            return (i, true);
        }
        i += 1;
    }
    if n > 0 {
        tokens.push(Token::new(0, n, StyleId::Comment));
    }
    (n, false)
}

fn continue_template_string(chars: &[char], tokens: &mut Vec<Token>) -> (usize, bool) {
    let n = chars.len();
    let mut i = 0;
    while i < n {
        if chars[i] == '\\' && i + 1 < n {
            i += 2;
            continue;
        }
        if chars[i] == '`' {
            i += 1;
            tokens.push(Token::new(0, i, StyleId::String));
            return (i, true);
        }
        i += 1;
    }
    if n > 0 {
        tokens.push(Token::new(0, n, StyleId::String));
    }
    (n, false)
}

/// A `/` can begin a regex literal at line start or after an operator,
/// punctuation or keyword token; after a value it is division.
fn can_start_regex(tokens: &[Token]) -> bool {
    match tokens.last() {
        None => true,
        Some(last) => {
            matches!(last.style, StyleId::Operator | StyleId::Punctuation | StyleId::Keyword)
        }
    }
}

/// Length of a regex literal starting at `i`, including flags, or `None`
/// if the text does not close as a regex on this line.
fn try_parse_regex(chars: &[char], i: usize) -> Option<usize> {
    let n = chars.len();
    if i >= n || chars[i] != '/' {
        return None;
    }
    let mut j = i + 1;
    if j >= n || matches!(chars[j], '/' | '*') {
        return None;
    }
    let mut in_class = false;
    while j < n {
        let ch = chars[j];
        if ch == '\\' && j + 1 < n {
            j += 2;
            continue;
        }
        match ch {
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                j += 1;
                while j < n && chars[j].is_alphabetic() {
                    j += 1;
                }
                return Some(j - i);
            }
            '\r' | '\n' => return None,
            _ => {}
        }
        j += 1;
    }
    None
}
