// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Registry of language tokenizers and file-extension mappings.

use std::collections::HashMap;

use once_cell::unsync::OnceCell;

use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::tokenizers::{self, PlainTokenizer};

/// Maps language ids to tokenizer instances and file extensions to
/// language ids.
///
/// Registration order does not matter; re-registering a language id
/// overwrites its tokenizer, and extension mappings are last-write-wins per
/// extension string.
#[derive(Default)]
pub struct TokenizerRegistry {
    tokenizers: HashMap<String, Box<dyn Tokenizer>>,
    extensions: HashMap<String, String>,
    default_tokenizer: OnceCell<PlainTokenizer>,
}

impl TokenizerRegistry {
    /// An empty registry with the built-in extension table seeded.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.seed_extension_map();
        registry
    }

    /// A registry with all nine built-in language tokenizers registered.
    pub fn with_builtin_tokenizers() -> Self {
        let mut registry = Self::new();
        tokenizers::register_builtin(&mut registry);
        registry
    }

    fn seed_extension_map(&mut self) {
        const EXTENSIONS: &[(&str, &str)] = &[
            (".py", "python"),
            (".pyw", "python"),
            (".c", "c"),
            (".h", "c"),
            (".cpp", "cpp"),
            (".hpp", "cpp"),
            (".cc", "cpp"),
            (".cxx", "cpp"),
            (".hxx", "cpp"),
            (".java", "java"),
            (".html", "html"),
            (".htm", "html"),
            (".xml", "html"),
            (".json", "json"),
            (".md", "markdown"),
            (".markdown", "markdown"),
            (".js", "javascript"),
            (".jsx", "javascript"),
            (".txt", "plain"),
        ];
        for (ext, lang) in EXTENSIONS {
            self.extensions.insert((*ext).to_string(), (*lang).to_string());
        }
    }

    /// Registers a tokenizer for a language id along with its file
    /// extensions (leading dot, e.g. `".py"`).
    pub fn register(
        &mut self,
        lang_id: &str,
        tokenizer: Box<dyn Tokenizer>,
        extensions: &[&str],
    ) {
        log::debug!("registering tokenizer for {lang_id:?} ({} extensions)", extensions.len());
        self.tokenizers.insert(lang_id.to_string(), tokenizer);
        for ext in extensions {
            self.extensions.insert(ext.to_ascii_lowercase(), lang_id.to_string());
        }
    }

    pub fn get_tokenizer(&self, lang_id: &str) -> Option<&dyn Tokenizer> {
        self.tokenizers.get(lang_id).map(Box::as_ref)
    }

    /// The language registered for a file extension (leading dot,
    /// case-insensitive), if any.
    pub fn lang_for_extension(&self, ext: &str) -> Option<&str> {
        self.extensions.get(&ext.to_ascii_lowercase()).map(String::as_str)
    }

    /// The fallback tokenizer, a lazily constructed plain-text tokenizer.
    pub fn default_tokenizer(&self) -> &dyn Tokenizer {
        self.default_tokenizer.get_or_init(PlainTokenizer::new)
    }

    /// Registered language ids, unordered.
    pub fn registered_languages(&self) -> impl Iterator<Item = &str> {
        self.tokenizers.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::types::{StateStack, StyleId};

    #[test]
    fn test_builtin_languages_registered() {
        let registry = TokenizerRegistry::with_builtin_tokenizers();
        for lang in ["plain", "json", "html", "markdown", "python", "c", "cpp", "java", "javascript"]
        {
            assert!(registry.get_tokenizer(lang).is_some(), "missing {lang}");
        }
        assert!(registry.get_tokenizer("cobol").is_none());
    }

    #[test]
    fn test_extension_lookup() {
        let registry = TokenizerRegistry::with_builtin_tokenizers();
        assert_eq!(registry.lang_for_extension(".py"), Some("python"));
        assert_eq!(registry.lang_for_extension(".pyw"), Some("python"));
        assert_eq!(registry.lang_for_extension(".hxx"), Some("cpp"));
        assert_eq!(registry.lang_for_extension(".xml"), Some("html"));
        assert_eq!(registry.lang_for_extension(".jsx"), Some("javascript"));
        assert_eq!(registry.lang_for_extension(".PY"), Some("python"));
        assert_eq!(registry.lang_for_extension(".xyz"), None);
    }

    #[test]
    fn test_default_tokenizer_is_plain() {
        let registry = TokenizerRegistry::new();
        let tokenizer = registry.default_tokenizer();
        assert_eq!(tokenizer.lang_id(), "plain");

        let result = tokenizer.tokenize_line("anything", &StateStack::empty());
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].style, StyleId::Plain);
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut registry = TokenizerRegistry::new();
        registry.register("plain", Box::new(PlainTokenizer::new()), &[".log"]);
        registry.register("python", Box::new(PlainTokenizer::new()), &[".log"]);

        assert_eq!(registry.lang_for_extension(".log"), Some("python"));
        assert!(registry.get_tokenizer("plain").is_some());
    }
}
