// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Syntax highlighting infrastructure.
//!
//! This module provides the core highlighting machinery: shared value types,
//! the state-stack interning pool, the style registry, the tokenizer
//! registry, the incremental update manager, and the document highlighter
//! that ties them together for a host rendering component.

pub mod change;
pub mod highlighter;
pub mod incremental;
pub mod language;
pub mod registry;
mod scan;
pub mod stack_pool;
pub mod style;
pub mod tokenizer;
pub mod tokenizers;
pub mod types;

pub use change::{ChangeKind, TextChange};
pub use highlighter::{DocumentHighlighter, HighlightMetrics, LineHighlight, StyledSpan};
pub use incremental::IncrementalManager;
pub use language::LanguageDetector;
pub use registry::TokenizerRegistry;
pub use stack_pool::{EMPTY_STATE, StateId, StateStackPool};
pub use style::{Color, StyleRegistry, TextFormat};
pub use tokenizer::Tokenizer;
pub use types::{StackFrame, StateStack, StyleId, Token, TokenizeResult};
