// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! JSON tokenizer.
//!
//! Stateless across lines; JSON tokens never span a line break in this
//! design. String literals are disambiguated into object keys versus
//! values by peeking past trailing whitespace for a `:`.

use crate::syntax::scan::skip_inline_whitespace;
use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::types::{StateStack, StyleId, Token, TokenizeResult};

#[derive(Debug, Default)]
pub struct JsonTokenizer;

impl JsonTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for JsonTokenizer {
    fn lang_id(&self) -> &'static str {
        "json"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        let chars: Vec<char> = line.chars().collect();
        let n = chars.len();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < n {
            let ch = chars[i];

            if matches!(ch, ' ' | '\t' | '\r' | '\n') {
                i += 1;
                continue;
            }

            if ch == '"' {
                let start = i;
                i += 1;
                while i < n {
                    if chars[i] == '\\' && i + 1 < n {
                        i += 2;
                    } else if chars[i] == '"' {
                        i += 1;
                        break;
                    } else {
                        i += 1;
                    }
                }
                let after = skip_inline_whitespace(&chars, i);
                let style = if after < n && chars[after] == ':' {
                    StyleId::AttrName
                } else {
                    StyleId::String
                };
                tokens.push(Token::new(start, i - start, style));
                continue;
            }

            if matches!(ch, '{' | '}' | '[' | ']' | ':' | ',') {
                tokens.push(Token::new(i, 1, StyleId::Punctuation));
                i += 1;
                continue;
            }

            if ch == '-' || ch.is_ascii_digit() {
                let start = i;
                if ch == '-' {
                    i += 1;
                }
                while i < n && chars[i].is_ascii_digit() {
                    i += 1;
                }
                if i < n && chars[i] == '.' {
                    i += 1;
                    while i < n && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                if i < n && matches!(chars[i], 'e' | 'E') {
                    i += 1;
                    if i < n && matches!(chars[i], '+' | '-') {
                        i += 1;
                    }
                    while i < n && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                tokens.push(Token::new(start, i - start, StyleId::Number));
                continue;
            }

            let mut literal = false;
            for word in ["true", "false", "null"] {
                if crate::syntax::scan::matches_at(&chars, i, word) {
                    tokens.push(Token::new(i, word.len(), StyleId::Keyword));
                    i += word.len();
                    literal = true;
                    break;
                }
            }
            if literal {
                continue;
            }

            i += 1;
        }

        TokenizeResult::new(tokens, stack.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(line: &str) -> Vec<Token> {
        JsonTokenizer::new().tokenize_line(line, &StateStack::empty()).tokens
    }

    #[test]
    fn test_key_versus_value_strings() {
        let tokens = tokenize(r#"  "name": "linelex","#);
        assert_eq!(tokens[0], Token::new(2, 6, StyleId::AttrName));
        assert_eq!(tokens[1], Token::new(8, 1, StyleId::Punctuation));
        assert_eq!(tokens[2], Token::new(10, 9, StyleId::String));
    }

    #[test]
    fn test_key_with_space_before_colon() {
        let tokens = tokenize(r#""key"  : 1"#);
        assert_eq!(tokens[0].style, StyleId::AttrName);
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("[-1, 2.5, 3e-8]");
        let numbers: Vec<Token> =
            tokens.into_iter().filter(|t| t.style == StyleId::Number).collect();
        assert_eq!(numbers[0], Token::new(1, 2, StyleId::Number));
        assert_eq!(numbers[1], Token::new(5, 3, StyleId::Number));
        assert_eq!(numbers[2], Token::new(10, 4, StyleId::Number));
    }

    #[test]
    fn test_literals_are_keywords() {
        let tokens = tokenize("[true, false, null]");
        let keywords: Vec<Token> =
            tokens.into_iter().filter(|t| t.style == StyleId::Keyword).collect();
        assert_eq!(keywords.len(), 3);
        assert_eq!(keywords[0], Token::new(1, 4, StyleId::Keyword));
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let tokens = tokenize(r#""a\"b": 1"#);
        assert_eq!(tokens[0], Token::new(0, 6, StyleId::AttrName));
    }

    #[test]
    fn test_state_is_unchanged() {
        let result = JsonTokenizer::new().tokenize_line(r#"{"a": 1}"#, &StateStack::empty());
        assert!(result.final_stack.is_empty());
    }

    #[test]
    fn test_tokens_are_ordered_and_disjoint() {
        let tokens = tokenize(r#"{"a": [1, true, "x"]}"#);
        for pair in tokens.windows(2) {
            assert!(pair[0].start + pair[0].length <= pair[1].start);
        }
    }
}
