// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Document-level highlighting orchestration.
//!
//! [`DocumentHighlighter`] owns every piece of per-document highlighting
//! state: the tokenizer registry, the style registry, the state-stack
//! interning pool, the incremental line cache, and performance metrics.
//! Constructing separate highlighters yields fully isolated instances;
//! there is no process-global state.

use std::time::{Duration, Instant};

use crate::syntax::change::{ChangeKind, TextChange};
use crate::syntax::incremental::IncrementalManager;
use crate::syntax::registry::TokenizerRegistry;
use crate::syntax::stack_pool::{StateId, StateStackPool};
use crate::syntax::style::{StyleRegistry, TextFormat};
use crate::syntax::tokenizer::Tokenizer;
use crate::syntax::types::{StateStack, StyleId, TokenizeResult};

/// A token resolved against the style registry, ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledSpan {
    /// Offset of the first char of the span.
    pub start: usize,
    /// Number of chars covered.
    pub length: usize,
    /// Style category for the span.
    pub style: StyleId,
    /// Renderable format looked up at highlight time.
    pub format: TextFormat,
}

/// The outcome of highlighting one line of a tracked document.
#[derive(Debug, Clone, PartialEq)]
pub struct LineHighlight {
    /// Styled spans, sorted by start offset.
    pub spans: Vec<StyledSpan>,
    /// Interned final lexical state of the line.
    pub state_id: StateId,
    /// Whether the line's text or final state differs from the last visit.
    /// `false` means re-tokenization need not propagate past this line.
    pub changed: bool,
}

/// Performance metrics for highlighting operations.
#[derive(Debug, Clone, Default)]
pub struct HighlightMetrics {
    /// Total time spent tokenizing lines
    pub total_time: Duration,
    /// Number of lines highlighted
    pub lines_highlighted: usize,
    /// Number of tokens generated
    pub tokens_generated: usize,
    /// Average time per line
    pub avg_time_per_line: Duration,
    /// Maximum time for a single line
    pub max_line_time: Duration,
    /// Lines whose text and state matched the cache
    pub cache_hits: usize,
    /// Lines that had to propagate re-tokenization
    pub cache_misses: usize,
}

impl HighlightMetrics {
    /// Updates metrics with one line-highlight operation.
    pub fn record_line_highlight(&mut self, duration: Duration, token_count: usize) {
        self.total_time += duration;
        self.lines_highlighted += 1;
        self.tokens_generated += token_count;

        if self.lines_highlighted > 0 {
            self.avg_time_per_line = self.total_time / self.lines_highlighted as u32;
        }
        if duration > self.max_line_time {
            self.max_line_time = duration;
        }
    }

    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_cache_miss(&mut self) {
        self.cache_misses += 1;
    }

    /// Cache hit ratio in `0.0..=1.0`; `0.0` before any requests.
    pub fn cache_hit_ratio(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 { 0.0 } else { self.cache_hits as f64 / total as f64 }
    }

    pub fn reset(&mut self) {
        *self = Default::default();
    }
}

/// Highlighting engine for one document.
pub struct DocumentHighlighter {
    registry: TokenizerRegistry,
    styles: StyleRegistry,
    pool: StateStackPool,
    incremental: IncrementalManager,
    metrics: HighlightMetrics,
    lang_id: String,
}

impl Default for DocumentHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHighlighter {
    /// A highlighter with all built-in tokenizers, configured for plain
    /// text.
    pub fn new() -> Self {
        Self::with_registry(TokenizerRegistry::with_builtin_tokenizers())
    }

    /// A highlighter over a caller-assembled registry, e.g. one with extra
    /// languages registered.
    pub fn with_registry(registry: TokenizerRegistry) -> Self {
        Self {
            registry,
            styles: StyleRegistry::new(),
            pool: StateStackPool::new(),
            incremental: IncrementalManager::new(),
            metrics: HighlightMetrics::default(),
            lang_id: "plain".to_string(),
        }
    }

    /// The configured language id.
    pub fn language(&self) -> &str {
        &self.lang_id
    }

    /// Switches the configured language. Returns `false` (and changes
    /// nothing) when no tokenizer is registered for `lang_id`. Switching
    /// drops the incremental cache; interned state ids stay valid.
    pub fn set_language(&mut self, lang_id: &str) -> bool {
        if self.registry.get_tokenizer(lang_id).is_none() {
            log::debug!("set_language: no tokenizer registered for {lang_id:?}");
            return false;
        }
        if self.lang_id != lang_id {
            log::debug!("switching language {:?} -> {lang_id:?}", self.lang_id);
            self.lang_id = lang_id.to_string();
            self.incremental.clear();
        }
        true
    }

    /// Configures the language from a file path's extension. Returns the
    /// resulting language id; unrecognized extensions fall back to plain.
    pub fn set_language_for_path(&mut self, path: &str) -> &str {
        let ext = match path.rfind('.') {
            Some(dot) => &path[dot..],
            None => "",
        };
        let lang = self
            .registry
            .lang_for_extension(ext)
            .unwrap_or("plain")
            .to_string();
        self.set_language(&lang);
        self.language()
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    pub fn metrics(&self) -> &HighlightMetrics {
        &self.metrics
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Number of distinct lexical states interned so far.
    pub fn interned_state_count(&self) -> usize {
        self.pool.len()
    }

    /// Tokenizes one line against an explicit predecessor state, without
    /// touching the incremental cache.
    ///
    /// This is the stateless building block: the caller supplies the
    /// interned state carried out of the previous line ([`EMPTY_STATE`] at
    /// the start of the document) and receives the styled spans plus the
    /// interned final state to carry forward.
    ///
    /// [`EMPTY_STATE`]: crate::syntax::stack_pool::EMPTY_STATE
    pub fn highlight_block(&mut self, line: &str, prev_state: StateId) -> (Vec<StyledSpan>, StateId) {
        let stack = self.pool.get(prev_state);
        let result = self.tokenize_dispatch(line, &stack);
        let state_id = self.pool.intern(&result.final_stack);

        let spans = result
            .tokens
            .iter()
            .map(|token| StyledSpan {
                start: token.start,
                length: token.length,
                style: token.style,
                format: self.styles.get_format(token.style),
            })
            .collect();
        (spans, state_id)
    }

    /// Highlights line `index` of a document with `line_count` lines,
    /// consulting and updating the incremental cache.
    ///
    /// Callers run this top-to-bottom from the first edited line; once a
    /// result comes back with `changed == false`, lines after it are
    /// guaranteed unaffected and the pass may stop.
    pub fn highlight_line(&mut self, index: usize, text: &str, line_count: usize) -> LineHighlight {
        if self.incremental.line_count() != line_count {
            self.incremental.set_line_count(line_count);
        }

        let started = Instant::now();
        let prev_state = self.incremental.get_initial_state_id(index);
        let (spans, state_id) = self.highlight_block(text, prev_state);
        let changed = self.incremental.update_line(index, text, state_id);

        self.metrics.record_line_highlight(started.elapsed(), spans.len());
        if changed {
            self.metrics.record_cache_miss();
        } else {
            self.metrics.record_cache_hit();
        }
        log::trace!(
            "highlight_line {index}: {} spans, state {state_id}, changed={changed}",
            spans.len()
        );

        LineHighlight { spans, state_id, changed }
    }

    /// Invalidates cached line states affected by an edit. The next
    /// [`highlight_line`](Self::highlight_line) pass re-tokenizes from the
    /// change onward.
    pub fn apply_change(&mut self, change: &TextChange) {
        let first = match change.kind {
            ChangeKind::Insert | ChangeKind::Delete => change.start_line,
            ChangeKind::Replace | ChangeKind::Multiple => change.start_line.min(change.end_line),
        };
        log::debug!("apply_change {:?} at line {first}", change.kind);
        self.incremental.invalidate_from(first);
    }

    /// Picks the tokenizer for a line and runs it.
    ///
    /// A foreign top frame without an end condition belongs to that
    /// language's own tokenizer (it pushed the frame for its own
    /// continuation). A frame carrying an end condition was pushed by the
    /// configured language's embedding mechanism, and that tokenizer keeps
    /// ownership: it styles the content as EMBEDDED and watches for the
    /// closing marker.
    fn tokenize_dispatch(&self, line: &str, stack: &StateStack) -> TokenizeResult {
        let configured = self.configured_tokenizer();
        let tokenizer = match stack.top() {
            Some(frame)
                if frame.end_condition.is_none() && frame.lang_id != configured.lang_id() =>
            {
                self.registry.get_tokenizer(&frame.lang_id).unwrap_or(configured)
            }
            _ => configured,
        };
        tokenizer.tokenize_line(line, stack)
    }

    fn configured_tokenizer(&self) -> &dyn Tokenizer {
        self.registry
            .get_tokenizer(&self.lang_id)
            .unwrap_or_else(|| self.registry.default_tokenizer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::stack_pool::EMPTY_STATE;

    fn highlighter_for(lang: &str) -> DocumentHighlighter {
        let mut highlighter = DocumentHighlighter::new();
        assert!(highlighter.set_language(lang));
        highlighter
    }

    fn styles_of(spans: &[StyledSpan]) -> Vec<StyleId> {
        spans.iter().map(|s| s.style).collect()
    }

    #[test]
    fn test_set_language() {
        let mut highlighter = DocumentHighlighter::new();
        assert_eq!(highlighter.language(), "plain");
        assert!(highlighter.set_language("python"));
        assert_eq!(highlighter.language(), "python");
        assert!(!highlighter.set_language("cobol"));
        assert_eq!(highlighter.language(), "python");
    }

    #[test]
    fn test_set_language_for_path() {
        let mut highlighter = DocumentHighlighter::new();
        assert_eq!(highlighter.set_language_for_path("src/app.PY"), "python");
        assert_eq!(highlighter.set_language_for_path("notes"), "plain");
        assert_eq!(highlighter.set_language_for_path("x.unknown"), "plain");
    }

    #[test]
    fn test_highlight_block_resolves_formats() {
        let mut highlighter = highlighter_for("python");
        let (spans, state) = highlighter.highlight_block("def foo():", EMPTY_STATE);

        assert_eq!(spans[0].style, StyleId::Keyword);
        assert_eq!(spans[0].format, highlighter.styles().get_format(StyleId::Keyword));
        assert_eq!(state, highlighter.highlight_block("def foo():", EMPTY_STATE).1);
    }

    #[test]
    fn test_state_threads_through_triple_quote() {
        let mut highlighter = highlighter_for("python");

        let (_, open) = highlighter.highlight_block("s = \"\"\"start", EMPTY_STATE);
        assert_ne!(open, EMPTY_STATE);

        let (middle_spans, middle) = highlighter.highlight_block("middle", open);
        assert_eq!(styles_of(&middle_spans), vec![StyleId::String]);
        assert_eq!(middle, open);

        let (_, closed) = highlighter.highlight_block("end\"\"\"", middle);
        assert_eq!(highlighter.highlight_block("x", closed).1, closed);
    }

    #[test]
    fn test_end_to_end_html_script_document() {
        let mut highlighter = highlighter_for("html");
        let lines = ["<script>", "var x = 1;", "</script>"];

        let (open_spans, s1) = highlighter.highlight_block(lines[0], EMPTY_STATE);
        assert_eq!(styles_of(&open_spans), vec![StyleId::Tag, StyleId::Tag]);

        let (body_spans, s2) = highlighter.highlight_block(lines[1], s1);
        assert_eq!(styles_of(&body_spans), vec![StyleId::Embedded]);
        assert_eq!(s2, s1);

        let (close_spans, s3) = highlighter.highlight_block(lines[2], s2);
        assert!(close_spans.iter().any(|s| s.style == StyleId::Tag));

        // Depth is back to the bare html frame: a following plain line
        // keeps the same state.
        let final_stack_depth_state = highlighter.highlight_block("text", s3).1;
        let (_, again) = highlighter.highlight_block("text", final_stack_depth_state);
        assert_eq!(again, final_stack_depth_state);
    }

    #[test]
    fn test_markdown_fence_keeps_markdown_ownership() {
        let mut highlighter = highlighter_for("markdown");

        let (_, fence) = highlighter.highlight_block("```python", EMPTY_STATE);
        let (body, same) = highlighter.highlight_block("def foo():", fence);
        assert_eq!(styles_of(&body), vec![StyleId::Embedded]);
        assert_eq!(same, fence);

        let (close, after) = highlighter.highlight_block("```", same);
        assert_eq!(styles_of(&close), vec![StyleId::Punctuation]);
        assert_ne!(after, fence);
    }

    #[test]
    fn test_foreign_frame_without_end_condition_dispatches() {
        // A javascript continuation frame is handled by the javascript
        // tokenizer even when the document is configured as html.
        let mut highlighter = highlighter_for("javascript");
        let (_, open) = highlighter.highlight_block("/* comment", EMPTY_STATE);

        assert!(highlighter.set_language("html"));
        let (spans, closed) = highlighter.highlight_block("done */ x", open);
        assert_eq!(spans[0].style, StyleId::Comment);
        assert_ne!(closed, open);
    }

    #[test]
    fn test_highlight_line_incremental_early_exit() {
        let mut highlighter = highlighter_for("python");
        let lines = ["import os", "x = 1", "y = 2"];

        for (i, text) in lines.iter().enumerate() {
            let result = highlighter.highlight_line(i, text, lines.len());
            assert!(result.changed, "first pass always reports change");
        }

        // Re-running the identical document reports no changes.
        for (i, text) in lines.iter().enumerate() {
            let result = highlighter.highlight_line(i, text, lines.len());
            assert!(!result.changed);
        }

        // Editing line 1 re-reports it, and line 2 settles immediately
        // because its text and predecessor state are unchanged.
        assert!(highlighter.highlight_line(1, "x = 99", lines.len()).changed);
        assert!(!highlighter.highlight_line(2, "y = 2", lines.len()).changed);
    }

    #[test]
    fn test_apply_change_forces_rehighlight() {
        let mut highlighter = highlighter_for("python");
        highlighter.highlight_line(0, "a = 1", 2);
        highlighter.highlight_line(1, "b = 2", 2);
        assert!(!highlighter.highlight_line(1, "b = 2", 2).changed);

        highlighter.apply_change(&TextChange::single_line(1, ChangeKind::Replace));
        assert!(highlighter.highlight_line(1, "b = 2", 2).changed);
    }

    #[test]
    fn test_language_switch_clears_incremental_cache() {
        let mut highlighter = highlighter_for("python");
        highlighter.highlight_line(0, "# note", 1);
        assert!(!highlighter.highlight_line(0, "# note", 1).changed);

        assert!(highlighter.set_language("c"));
        assert!(highlighter.highlight_line(0, "# note", 1).changed);
    }

    #[test]
    fn test_metrics_accumulate() {
        let mut highlighter = highlighter_for("json");
        highlighter.highlight_line(0, "{\"a\": 1}", 1);
        highlighter.highlight_line(0, "{\"a\": 1}", 1);

        let metrics = highlighter.metrics();
        assert_eq!(metrics.lines_highlighted, 2);
        assert!(metrics.tokens_generated > 0);
        assert_eq!(metrics.cache_misses, 1);
        assert_eq!(metrics.cache_hits, 1);
        assert_eq!(metrics.cache_hit_ratio(), 0.5);

        highlighter.reset_metrics();
        assert_eq!(highlighter.metrics().lines_highlighted, 0);
    }

    #[test]
    fn test_isolated_instances() {
        let mut a = highlighter_for("python");
        let b = DocumentHighlighter::new();

        a.highlight_block("\"\"\"", EMPTY_STATE);
        assert!(a.interned_state_count() > 0);
        assert_eq!(b.interned_state_count(), 0);
    }
}
