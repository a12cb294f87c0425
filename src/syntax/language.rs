// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Language detection from file paths and file content.
//!
//! Detection strategy:
//! 1. Extract the file extension and look it up in the extension map.
//! 2. If the path has no recognized extension, probe the first 50 lines of
//!    content with per-language heuristics.
//! 3. Fall back to `"plain"`.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Global mapping of file extensions (without the dot) to language ids.
static EXTENSION_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert("py", "python");
    map.insert("pyw", "python");
    map.insert("c", "c");
    map.insert("h", "c");
    map.insert("cpp", "cpp");
    map.insert("hpp", "cpp");
    map.insert("cc", "cpp");
    map.insert("cxx", "cpp");
    map.insert("hxx", "cpp");
    map.insert("java", "java");
    map.insert("html", "html");
    map.insert("htm", "html");
    map.insert("xml", "html");
    map.insert("json", "json");
    map.insert("md", "markdown");
    map.insert("markdown", "markdown");
    map.insert("js", "javascript");
    map.insert("jsx", "javascript");
    map.insert("txt", "plain");

    map
});

/// Preferred extension per language, used by [`LanguageDetector::suggest_extension`].
static PRIMARY_EXTENSION: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert("python", ".py");
    map.insert("c", ".c");
    map.insert("cpp", ".cpp");
    map.insert("java", ".java");
    map.insert("html", ".html");
    map.insert("json", ".json");
    map.insert("markdown", ".md");
    map.insert("javascript", ".js");
    map.insert("plain", ".txt");

    map
});

static PY_IMPORT: Lazy<Regex> = Lazy::new(|| multiline(r"^\s*(import|from)\s+\w+"));
static PY_DEF: Lazy<Regex> = Lazy::new(|| multiline(r"^\s*def\s+\w+\s*\("));
static PY_CLASS: Lazy<Regex> = Lazy::new(|| multiline(r"^\s*class\s+\w+.*:"));
static C_INCLUDE: Lazy<Regex> = Lazy::new(|| multiline(r#"^\s*#include\s*[<"]"#));
static CPP_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(class|namespace|template)\b").unwrap());
static JAVA_TYPE: Lazy<Regex> =
    Lazy::new(|| multiline(r"^\s*(public|private|protected)\s+(class|interface)\s+\w+"));
static JAVA_PACKAGE: Lazy<Regex> = Lazy::new(|| multiline(r"^\s*package\s+[\w.]+;"));
static HTML_DOCTYPE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^\s*<!DOCTYPE\s+html")
        .multi_line(true)
        .case_insensitive(true)
        .build()
        .unwrap()
});
static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"<html[\s>]").case_insensitive(true).build().unwrap()
});
static JSON_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r#""\w+"\s*:"#).unwrap());
static MD_HEADER: Lazy<Regex> = Lazy::new(|| multiline(r"^#{1,6}\s"));
static MD_LIST: Lazy<Regex> = Lazy::new(|| multiline(r"^\s*[-*]\s"));
static MD_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.+\]\(.+\)").unwrap());

fn multiline(pattern: &str) -> Regex {
    RegexBuilder::new(pattern).multi_line(true).build().unwrap()
}

/// Language detector combining extension and content heuristics.
#[derive(Debug, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detects the language id for a file, trying the extension first and
    /// the content heuristics second.
    pub fn detect<P: AsRef<Path>>(&self, path: P, content: &str) -> &'static str {
        if let Some(lang) = self.detect_from_extension(&path) {
            return lang;
        }
        self.detect_from_content(content)
    }

    /// Extension-based lookup, case-insensitive. `None` when the path has
    /// no extension or an unrecognized one.
    pub fn detect_from_extension<P: AsRef<Path>>(&self, path: P) -> Option<&'static str> {
        let extension = path.as_ref().extension()?.to_str()?;
        EXTENSION_MAP.get(extension.to_lowercase().as_str()).copied()
    }

    /// Content-based detection over the first 50 lines. Always returns a
    /// language id; `"plain"` when nothing matches.
    pub fn detect_from_content(&self, content: &str) -> &'static str {
        let text: String = content.lines().take(50).collect::<Vec<_>>().join("\n");

        if PY_IMPORT.is_match(&text) && (PY_DEF.is_match(&text) || PY_CLASS.is_match(&text)) {
            return "python";
        }

        if C_INCLUDE.is_match(&text) {
            return if CPP_MARKER.is_match(&text) { "cpp" } else { "c" };
        }

        if JAVA_TYPE.is_match(&text) || JAVA_PACKAGE.is_match(&text) {
            return "java";
        }

        if HTML_DOCTYPE.is_match(&text) || HTML_TAG.is_match(&text) {
            return "html";
        }

        let trimmed = text.trim();
        if (trimmed.starts_with('{') || trimmed.starts_with('[')) && JSON_KEY.is_match(&text) {
            return "json";
        }

        if MD_HEADER.is_match(&text) || (MD_LIST.is_match(&text) && MD_LINK.is_match(&text)) {
            return "markdown";
        }

        "plain"
    }

    /// Appends a content-derived extension to a path that lacks a
    /// recognized one; paths that already carry one are returned as-is.
    pub fn suggest_extension(&self, path: &str, content: &str) -> String {
        if self.detect_from_extension(path).is_some() {
            return path.to_string();
        }
        let lang = self.detect_from_content(content);
        let ext = PRIMARY_EXTENSION.get(lang).copied().unwrap_or(".txt");
        format!("{path}{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_from_extension() {
        let detector = LanguageDetector::new();

        assert_eq!(detector.detect_from_extension("main.py"), Some("python"));
        assert_eq!(detector.detect_from_extension("/path/to/page.HTML"), Some("html"));
        assert_eq!(detector.detect_from_extension("lib.hxx"), Some("cpp"));
        assert_eq!(detector.detect_from_extension("notes.txt"), Some("plain"));
        assert_eq!(detector.detect_from_extension("Makefile"), None);
        assert_eq!(detector.detect_from_extension("archive.tar.gz"), None);
    }

    #[test]
    fn test_python_content_needs_import_and_definition() {
        let detector = LanguageDetector::new();

        let full = "import os\n\ndef main():\n    pass\n";
        assert_eq!(detector.detect_from_content(full), "python");

        let import_only = "import os\nprint(1)\n";
        assert_eq!(detector.detect_from_content(import_only), "plain");
    }

    #[test]
    fn test_c_versus_cpp_content() {
        let detector = LanguageDetector::new();

        assert_eq!(detector.detect_from_content("#include <stdio.h>\nint main() {}\n"), "c");
        assert_eq!(
            detector.detect_from_content("#include <vector>\nnamespace app {}\n"),
            "cpp"
        );
    }

    #[test]
    fn test_java_content() {
        let detector = LanguageDetector::new();

        assert_eq!(detector.detect_from_content("package com.example.app;\n"), "java");
        assert_eq!(detector.detect_from_content("public class Main {\n}\n"), "java");
    }

    #[test]
    fn test_html_content_is_case_insensitive() {
        let detector = LanguageDetector::new();

        assert_eq!(detector.detect_from_content("<!doctype HTML>\n<body>"), "html");
        assert_eq!(detector.detect_from_content("x\n<HTML>\n"), "html");
    }

    #[test]
    fn test_json_content_requires_key_shape() {
        let detector = LanguageDetector::new();

        assert_eq!(detector.detect_from_content("{\"name\": 1}"), "json");
        assert_eq!(detector.detect_from_content("[1, 2, 3]"), "plain");
    }

    #[test]
    fn test_markdown_content() {
        let detector = LanguageDetector::new();

        assert_eq!(detector.detect_from_content("# Title\n\nbody\n"), "markdown");
        assert_eq!(
            detector.detect_from_content("- [home](http://x)\n- second\n"),
            "markdown"
        );
    }

    #[test]
    fn test_extension_wins_over_content() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("page.md", "#include <stdio.h>"), "markdown");
        assert_eq!(detector.detect("noext", "#include <stdio.h>"), "c");
    }

    #[test]
    fn test_suggest_extension() {
        let detector = LanguageDetector::new();

        assert_eq!(detector.suggest_extension("main.py", ""), "main.py");
        assert_eq!(
            detector.suggest_extension("untitled", "# Notes\n"),
            "untitled.md"
        );
        assert_eq!(detector.suggest_extension("untitled", "hello"), "untitled.txt");
    }

    #[test]
    fn test_only_first_fifty_lines_are_probed() {
        let detector = LanguageDetector::new();
        let mut content = String::new();
        for _ in 0..60 {
            content.push_str("plain line\n");
        }
        content.push_str("# Late header\n");
        assert_eq!(detector.detect_from_content(&content), "plain");
    }
}
