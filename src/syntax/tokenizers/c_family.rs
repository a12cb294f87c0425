// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! C, C++ and Java tokenizers.
//!
//! The three languages share one scanner; a per-language config supplies the
//! keyword set, operator set, numeric suffix characters, and whether the
//! language has preprocessor directives (C, C++) or annotations (Java).
//! Block comments are the only multi-line construct.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::syntax::scan::{matches_at, slice_to_string};
use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::types::{StackFrame, StateStack, StyleId, Token, TokenizeResult};

const STATE_DEFAULT: u8 = 0;
pub(crate) const STATE_BLOCK_COMMENT: u8 = 1;

static C_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "auto", "break", "case", "char", "const", "continue", "default", "do", "double",
        "else", "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long",
        "register", "restrict", "return", "short", "signed", "sizeof", "static", "struct",
        "switch", "typedef", "union", "unsigned", "void", "volatile", "while", "_Bool",
        "_Complex", "_Imaginary", "bool", "true", "false", "NULL",
    ]
    .into_iter()
    .collect()
});

static CPP_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = C_KEYWORDS.clone();
    set.extend([
        "class", "namespace", "template", "public", "private", "protected", "virtual",
        "override", "new", "delete", "try", "catch", "throw", "nullptr", "const_cast",
        "dynamic_cast", "static_cast", "reinterpret_cast", "using", "typename",
        "explicit", "mutable", "friend", "operator", "this", "constexpr", "noexcept",
        "decltype", "alignas", "alignof", "thread_local", "static_assert",
    ]);
    set
});

static JAVA_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
        "class", "const", "continue", "default", "do", "double", "else", "enum",
        "extends", "final", "finally", "float", "for", "goto", "if", "implements",
        "import", "instanceof", "int", "interface", "long", "native", "new", "package",
        "private", "protected", "public", "return", "short", "static", "strictfp",
        "super", "switch", "synchronized", "this", "throw", "throws", "transient",
        "try", "void", "volatile", "while", "true", "false", "null",
    ]
    .into_iter()
    .collect()
});

static C_OPERATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "+", "-", "*", "/", "%", "=", "==", "!=", "<", ">", "<=", ">=", "&&", "||", "!",
        "&", "|", "^", "~", "<<", ">>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
        "<<=", ">>=", "++", "--", "->", ".", "?", ":",
    ]
    .into_iter()
    .collect()
});

static CPP_OPERATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = C_OPERATORS.clone();
    set.insert("::");
    set
});

static JAVA_OPERATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "+", "-", "*", "/", "%", "=", "==", "!=", "<", ">", "<=", ">=", "&&", "||", "!",
        "&", "|", "^", "~", "<<", ">>", ">>>", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
        "^=", "<<=", ">>=", ">>>=", "++", "--", "->", ".", "?", ":", "::",
    ]
    .into_iter()
    .collect()
});

fn is_punctuation(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']' | '{' | '}' | ',' | ';')
}

struct FamilyConfig {
    lang_id: &'static str,
    keywords: &'static Lazy<HashSet<&'static str>>,
    operators: &'static Lazy<HashSet<&'static str>>,
    numeric_suffixes: &'static str,
    preprocessor: bool,
    annotations: bool,
}

fn tokenize_family(config: &FamilyConfig, line: &str, stack: &StateStack) -> TokenizeResult {
    let chars: Vec<char> = line.chars().collect();
    let n = chars.len();
    let mut tokens = Vec::new();
    let mut stack = stack.clone();
    let mut i = 0;

    let sub_state = match stack.top() {
        Some(frame) if frame.lang_id == config.lang_id => frame.sub_state,
        _ => STATE_DEFAULT,
    };

    if sub_state == STATE_BLOCK_COMMENT {
        let mut closed = false;
        while i < n {
            if matches_at(&chars, i, "*/") {
                i += 2;
                tokens.push(Token::new(0, i, StyleId::Comment));
                stack = stack.popped();
                closed = true;
                break;
            }
            i += 1;
        }
        if !closed {
            if n > 0 {
                tokens.push(Token::new(0, n, StyleId::Comment));
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

        if ch == '/' && i + 1 < n && chars[i + 1] == '/' {
            tokens.push(Token::new(i, n - i, StyleId::Comment));
            break;
        }

        if ch == '/' && i + 1 < n && chars[i + 1] == '*' {
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
                stack = stack.pushed(StackFrame::new(config.lang_id, STATE_BLOCK_COMMENT, None));
                i = n;
            }
            continue;
        }

        // `#include`, `#define` and friends. The directive word is the
        // keyword; the rest of the line scans normally.
        if config.preprocessor && ch == '#' {
            let start = i;
            i += 1;
            while i < n && matches!(chars[i], ' ' | '\t') {
                i += 1;
            }
            while i < n && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::new(start, i - start, StyleId::Keyword));
            continue;
        }

        if config.annotations && ch == '@' {
            let start = i;
            i += 1;
            while i < n && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::new(start, i - start, StyleId::Identifier));
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
            while i < n && config.numeric_suffixes.contains(chars[i]) {
                i += 1;
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
            let style = if config.keywords.contains(word.as_str()) {
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
                if config.operators.contains(candidate.as_str()) {
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

#[derive(Debug, Default)]
pub struct CTokenizer;

impl CTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for CTokenizer {
    fn lang_id(&self) -> &'static str {
        "c"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        static CONFIG: FamilyConfig = FamilyConfig {
            lang_id: "c",
            keywords: &C_KEYWORDS,
            operators: &C_OPERATORS,
            numeric_suffixes: "uUlLfF",
            preprocessor: true,
            annotations: false,
        };
        tokenize_family(&CONFIG, line, stack)
    }
}

#[derive(Debug, Default)]
pub struct CppTokenizer;

impl CppTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for CppTokenizer {
    fn lang_id(&self) -> &'static str {
        "cpp"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        static CONFIG: FamilyConfig = FamilyConfig {
            lang_id: "cpp",
            keywords: &CPP_KEYWORDS,
            operators: &CPP_OPERATORS,
            numeric_suffixes: "uUlLfF",
            preprocessor: true,
            annotations: false,
        };
        tokenize_family(&CONFIG, line, stack)
    }
}

#[derive(Debug, Default)]
pub struct JavaTokenizer;

impl JavaTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for JavaTokenizer {
    fn lang_id(&self) -> &'static str {
        "java"
    }

    fn tokenize_line(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        static CONFIG: FamilyConfig = FamilyConfig {
            lang_id: "java",
            keywords: &JAVA_KEYWORDS,
            operators: &JAVA_OPERATORS,
            numeric_suffixes: "fFdDlL",
            preprocessor: false,
            annotations: true,
        };
        tokenize_family(&CONFIG, line, stack)
    }
}
