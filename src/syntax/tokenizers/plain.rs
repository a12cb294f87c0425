// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Plain-text tokenizer: one PLAIN token per non-empty line, no state.

use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::types::{StateStack, StyleId, Token, TokenizeResult};

#[derive(Debug, Default)]
pub struct PlainTokenizer;

impl PlainTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for PlainTokenizer {
    fn lang_id(&self) -> &'static str {
        "plain"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        let length = line.chars().count();
        let tokens = if length > 0 {
            vec![Token::new(0, length, StyleId::Plain)]
        } else {
            Vec::new()
        };
        TokenizeResult::new(tokens, stack.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::types::StackFrame;

    #[test]
    fn test_whole_line_is_plain() {
        let tokenizer = PlainTokenizer::new();
        let result = tokenizer.tokenize_line("hello world", &StateStack::empty());

        assert_eq!(result.tokens, vec![Token::new(0, 11, StyleId::Plain)]);
        assert!(result.final_stack.is_empty());
    }

    #[test]
    fn test_empty_line_has_no_tokens() {
        let tokenizer = PlainTokenizer::new();
        let result = tokenizer.tokenize_line("", &StateStack::empty());
        assert!(result.tokens.is_empty());
    }

    #[test]
    fn test_state_passes_through() {
        let tokenizer = PlainTokenizer::new();
        let stack = StateStack::single(StackFrame::default_for("plain"));
        let result = tokenizer.tokenize_line("text", &stack);
        assert_eq!(result.final_stack, stack);
    }

    #[test]
    fn test_length_is_in_chars() {
        let tokenizer = PlainTokenizer::new();
        let result = tokenizer.tokenize_line("héllo", &StateStack::empty());
        assert_eq!(result.tokens[0].length, 5);
    }
}
