// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Performance baseline script for the tokenization engine.
//!
//! Runs full highlighting passes over synthetic documents for each built-in
//! language, then demonstrates the incremental early-exit behavior after a
//! single-line edit.

use std::time::Instant;

use linelex::syntax::stack_pool::EMPTY_STATE;
use linelex::{ChangeKind, DocumentHighlighter, TextChange};

fn main() {
    println!("=== linelex tokenization baseline ===\n");

    let documents = sample_documents();
    let mut highlighter = DocumentHighlighter::new();

    for (lang, lines) in &documents {
        assert!(highlighter.set_language(lang), "unknown language {lang}");
        highlighter.reset_metrics();

        let start = Instant::now();
        let mut state = EMPTY_STATE;
        let mut token_count = 0usize;
        for line in lines {
            let (spans, next) = highlighter.highlight_block(line, state);
            token_count += spans.len();
            state = next;
        }
        let elapsed = start.elapsed();

        println!(
            "{lang:<11} {:>4} lines {:>5} tokens {:>8}us  ({} interned states)",
            lines.len(),
            token_count,
            elapsed.as_micros(),
            highlighter.interned_state_count(),
        );
    }

    println!("\n=== incremental early exit ===\n");
    incremental_demo(&mut highlighter);

    println!("\nBaseline complete.");
}

fn incremental_demo(highlighter: &mut DocumentHighlighter) {
    assert!(highlighter.set_language("python"));

    let mut lines: Vec<String> = Vec::new();
    for i in 0..200 {
        lines.push(format!("value_{i} = {i} * 2  # line {i}"));
    }

    // Full pass to warm the cache.
    for (i, line) in lines.iter().enumerate() {
        highlighter.highlight_line(i, line, lines.len());
    }

    // Edit one line in the middle, then re-run from it; the pass settles
    // on the first unchanged line.
    lines[100] = "value_100 = 77".to_string();
    highlighter.apply_change(&TextChange::single_line(100, ChangeKind::Replace));

    let start = Instant::now();
    let mut visited = 0usize;
    for i in 100..lines.len() {
        visited += 1;
        let result = highlighter.highlight_line(i, &lines[i], lines.len());
        if !result.changed {
            break;
        }
    }
    let elapsed = start.elapsed();

    let metrics = highlighter.metrics();
    println!("edited line 100 of {}; re-examined {visited} lines in {}us", lines.len(), elapsed.as_micros());
    println!(
        "metrics: {} lines highlighted, {} tokens, hit ratio {:.2}",
        metrics.lines_highlighted,
        metrics.tokens_generated,
        metrics.cache_hit_ratio(),
    );
}

fn sample_documents() -> Vec<(&'static str, Vec<String>)> {
    let mut documents = Vec::new();

    let mut python = Vec::new();
    python.push("import os".to_string());
    python.push("\"\"\"Module docstring".to_string());
    python.push("spanning lines.\"\"\"".to_string());
    for i in 0..100 {
        python.push(format!("def handler_{i}(x):"));
        python.push(format!("    return x * {i}  # doubles"));
    }
    documents.push(("python", python));

    let mut c = Vec::new();
    c.push("#include <stdio.h>".to_string());
    c.push("/* util".to_string());
    c.push("   functions */".to_string());
    for i in 0..100 {
        c.push(format!("int f_{i}(int x) {{ return x + {i}; }}"));
    }
    documents.push(("c", c));

    let mut js = Vec::new();
    js.push("const pattern = /ab+c/gi;".to_string());
    js.push("let s = `template".to_string());
    js.push("still template`;".to_string());
    for i in 0..100 {
        js.push(format!("function cb_{i}() {{ return {i} / 2; }}"));
    }
    documents.push(("javascript", js));

    let mut html = Vec::new();
    html.push("<!DOCTYPE html>".to_string());
    html.push("<script>".to_string());
    for i in 0..50 {
        html.push(format!("var counter_{i} = {i};"));
    }
    html.push("</script>".to_string());
    html.push("<p>Body &amp; text</p>".to_string());
    documents.push(("html", html));

    let mut markdown = Vec::new();
    markdown.push("# Baseline".to_string());
    markdown.push("```python".to_string());
    for i in 0..50 {
        markdown.push(format!("print({i})"));
    }
    markdown.push("```".to_string());
    markdown.push("- item with [link](http://example.com)".to_string());
    documents.push(("markdown", markdown));

    let mut json = Vec::new();
    json.push("{".to_string());
    for i in 0..100 {
        json.push(format!("  \"key_{i}\": [{i}, {}.5, true],", i * 2));
    }
    json.push("  \"done\": null".to_string());
    json.push("}".to_string());
    documents.push(("json", json));

    documents
}
