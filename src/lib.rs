// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Incremental, multi-language line tokenization and syntax highlighting.
//!
//! The engine is demand-driven: a host rendering component asks, for each
//! line in top-to-bottom order, "style this line, given the opaque state
//! integer left by the previous line". Everything needed to answer that —
//! per-language tokenizers, the state-stack interning pool, the style
//! registry, and the incremental change detector — lives under [`syntax`].

pub mod syntax;

pub use syntax::{
    ChangeKind, DocumentHighlighter, IncrementalManager, StateStack, StateStackPool, StyleId,
    StyleRegistry, TextChange, Token, TokenizeResult, Tokenizer, TokenizerRegistry,
};
