// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The built-in per-language tokenizers.

pub mod c_family;
pub mod html;
pub mod javascript;
pub mod json;
pub mod markdown;
pub mod plain;
pub mod python;

pub use c_family::{CTokenizer, CppTokenizer, JavaTokenizer};
pub use html::HtmlTokenizer;
pub use javascript::JavaScriptTokenizer;
pub use json::JsonTokenizer;
pub use markdown::MarkdownTokenizer;
pub use plain::PlainTokenizer;
pub use python::PythonTokenizer;

use crate::syntax::registry::TokenizerRegistry;

/// Registers all nine built-in tokenizers with their file extensions.
pub fn register_builtin(registry: &mut TokenizerRegistry) {
    registry.register("plain", Box::new(PlainTokenizer::new()), &[".txt"]);
    registry.register("python", Box::new(PythonTokenizer::new()), &[".py", ".pyw"]);
    registry.register("c", Box::new(CTokenizer::new()), &[".c", ".h"]);
    registry.register(
        "cpp",
        Box::new(CppTokenizer::new()),
        &[".cpp", ".hpp", ".cc", ".cxx", ".hxx"],
    );
    registry.register("java", Box::new(JavaTokenizer::new()), &[".java"]);
    registry.register("html", Box::new(HtmlTokenizer::new()), &[".html", ".htm", ".xml"]);
    registry.register("json", Box::new(JsonTokenizer::new()), &[".json"]);
    registry.register("markdown", Box::new(MarkdownTokenizer::new()), &[".md", ".markdown"]);
    registry.register("javascript", Box::new(JavaScriptTokenizer::new()), &[".js", ".jsx"]);
}
