// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Char-slice scanning helpers shared by the tokenizers.
//!
//! Tokenizers operate on `&[char]` so that token offsets come out in
//! Unicode scalar values rather than bytes.

/// True if `pat` occurs at `pos`.
pub(crate) fn matches_at(chars: &[char], pos: usize, pat: &str) -> bool {
    let mut i = pos;
    for pc in pat.chars() {
        match chars.get(i) {
            Some(&c) if c == pc => i += 1,
            _ => return false,
        }
    }
    true
}

/// True if `pat` occurs at `pos`, ignoring ASCII case.
pub(crate) fn matches_at_ignore_case(chars: &[char], pos: usize, pat: &str) -> bool {
    let mut i = pos;
    for pc in pat.chars() {
        match chars.get(i) {
            Some(&c) if c.eq_ignore_ascii_case(&pc) => i += 1,
            _ => return false,
        }
    }
    true
}

/// Collect `chars[start..end]` back into a `String`.
pub(crate) fn slice_to_string(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end.min(chars.len())].iter().collect()
}

/// Advance past an inline whitespace run, returning the new position.
pub(crate) fn skip_inline_whitespace(chars: &[char], mut pos: usize) -> usize {
    while pos < chars.len() && matches!(chars[pos], ' ' | '\t') {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_matches_at() {
        let line = chars("abc```def");
        assert!(matches_at(&line, 3, "```"));
        assert!(!matches_at(&line, 2, "```"));
        assert!(!matches_at(&line, 7, "def"));
        assert!(matches_at(&line, 9, ""));
    }

    #[test]
    fn test_matches_at_ignore_case() {
        let line = chars("</SCRIPT>");
        assert!(matches_at_ignore_case(&line, 0, "</script>"));
        assert!(!matches_at_ignore_case(&line, 1, "</script>"));
    }

    #[test]
    fn test_matches_at_with_multibyte() {
        let line = chars("héllo```");
        assert!(matches_at(&line, 5, "```"));
    }

    #[test]
    fn test_skip_inline_whitespace() {
        let line = chars("  \tx");
        assert_eq!(skip_inline_whitespace(&line, 0), 3);
        assert_eq!(skip_inline_whitespace(&line, 3), 3);
        assert_eq!(skip_inline_whitespace(&chars("   "), 0), 3);
    }

    #[test]
    fn test_slice_to_string() {
        let line = chars("hello world");
        assert_eq!(slice_to_string(&line, 6, 11), "world");
        assert_eq!(slice_to_string(&line, 6, 99), "world");
    }
}
