// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Python tokenizer.
//!
//! Triple-quoted strings are the only multi-line construct; an unterminated
//! `'''` or `"""` pushes a frame whose sub-state records which delimiter is
//! open, and continuation lines are consumed as string content until the
//! matching delimiter appears.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::syntax::scan::{matches_at, slice_to_string};
use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::types::{StackFrame, StateStack, StyleId, Token, TokenizeResult};

const STATE_DEFAULT: u8 = 0;
pub(crate) const STATE_TRIPLE_SINGLE: u8 = 1;
pub(crate) const STATE_TRIPLE_DOUBLE: u8 = 2;

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "if", "else", "elif", "for", "while", "def", "class", "return", "import", "from",
        "as", "try", "except", "finally", "with", "lambda", "yield", "raise", "pass",
        "break", "continue", "and", "or", "not", "in", "is", "None", "True", "False",
        "async", "await",
    ]
    .into_iter()
    .collect()
});

static OPERATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "+", "-", "*", "/", "//", "**", "%", "@", "=", "==", "!=", "<", ">", "<=", ">=",
        "<>", "&", "|", "^", "~", "<<", ">>", "+=", "-=", "*=", "/=", "//=", "**=", "%=",
        "@=", "&=", "|=", "^=", "<<=", ">>=", "->", ":=",
    ]
    .into_iter()
    .collect()
});

fn is_punctuation(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']' | '{' | '}' | ':' | ',' | '.' | ';')
}

#[derive(Debug, Default)]
pub struct PythonTokenizer;

impl PythonTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for PythonTokenizer {
    fn lang_id(&self) -> &'static str {
        "python"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        let chars: Vec<char> = line.chars().collect();
        let n = chars.len();
        let mut tokens = Vec::new();
        let mut stack = stack.clone();
        let mut i = 0;

        let sub_state = match stack.top() {
            Some(frame) if frame.lang_id == "python" => frame.sub_state,
            _ => STATE_DEFAULT,
        };

        if sub_state == STATE_TRIPLE_SINGLE || sub_state == STATE_TRIPLE_DOUBLE {
            let delimiter = if sub_state == STATE_TRIPLE_SINGLE { "'''" } else { "\"\"\"" };
            let mut closed = false;
            while i < n {
                if chars[i] == '\\' && i + 1 < n {
                    i += 2;
                    continue;
                }
                if matches_at(&chars, i, delimiter) {
                    i += 3;
                    tokens.push(Token::new(0, i, StyleId::String));
                    stack = stack.popped();
                    closed = true;
                    break;
                }
                i += 1;
            }
            if !closed {
                if n > 0 {
                    tokens.push(Token::new(0, n, StyleId::String));
                }
                return TokenizeResult::new(tokens, stack);
            }
        }

        while i < n {
            let ch = chars[i];

            if matches!(ch, ' ' | '\t' | '\r' | '\n') {
                i += 1;
                continue;
            }

            if ch == '#' {
                tokens.push(Token::new(i, n - i, StyleId::Comment));
                break;
            }

            // Decorators, including dotted names like @functools.wraps.
            if ch == '@' && i + 1 < n && (chars[i + 1].is_alphanumeric() || chars[i + 1] == '_') {
                let start = i;
                i += 1;
                while i < n && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '.') {
                    i += 1;
                }
                tokens.push(Token::new(start, i - start, StyleId::Identifier));
                continue;
            }

            if ch == '"' || ch == '\'' {
                let start = i;
                let triple = if matches_at(&chars, i, "\"\"\"") {
                    Some(("\"\"\"", STATE_TRIPLE_DOUBLE))
                } else if matches_at(&chars, i, "'''") {
                    Some(("'''", STATE_TRIPLE_SINGLE))
                } else {
                    None
                };

                if let Some((delimiter, open_state)) = triple {
                    i += 3;
                    let mut closed = false;
                    while i < n {
                        if chars[i] == '\\' && i + 1 < n {
                            i += 2;
                            continue;
                        }
                        if matches_at(&chars, i, delimiter) {
                            i += 3;
                            tokens.push(Token::new(start, i - start, StyleId::String));
                            closed = true;
                            break;
                        }
                        i += 1;
                    }
                    if !closed {
                        tokens.push(Token::new(start, n - start, StyleId::String));
                        stack = stack.pushed(StackFrame::new("python", open_state, None));
                        i = n;
                    }
                    continue;
                }

                let quote = ch;
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
                    if i < n && matches!(chars[i], 'j' | 'J') {
                        i += 1;
                    }
                }
                tokens.push(Token::new(start, i - start, StyleId::Number));
                continue;
            }

            if ch.is_alphanumeric() || ch == '_' {
                let start = i;
                while i < n && (chars[i].is_alphanumeric() || chars[i] == '_') {
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

            // Longest operator match first.
            let mut matched = false;
            for width in (1..=3usize).rev() {
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
