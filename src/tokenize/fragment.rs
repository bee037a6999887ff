//! Positioned text fragments produced by tokenization.
//!
//! A [`Fragment`] pairs a piece of the expression text with the line number
//! and character offset of its first character in the original input. The
//! position is carried for diagnostics only and never affects matching
//! semantics, but every slicing or merging step propagates it so error
//! messages can point at the right place even deep inside nested groups.
//!
//! # Examples
//!
//! ```
//! use termsieve::tokenize::Fragment;
//!
//! let frag = Fragment::new("missile", 0, 12);
//! assert_eq!(frag.as_str(), "missile");
//! assert_eq!(frag.offset(), 12);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A piece of expression text tagged with its position in the original
/// input.
///
/// Offsets and line numbers are counted in characters, zero-based. The
/// position always refers to the fragment's first character; interior
/// positions are recomputed by the tokenizer when a fragment is split
/// again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// The text content of the fragment.
    text: String,

    /// Zero-based line of the first character in the original input.
    line: u32,

    /// Zero-based character offset of the first character in the original
    /// input.
    offset: usize,
}

impl Fragment {
    /// Create a fragment positioned at the given line and character offset.
    pub fn new<S: Into<String>>(text: S, line: u32, offset: usize) -> Self {
        Fragment {
            text: text.into(),
            line,
            offset,
        }
    }

    /// Create a fragment for text synthesized during normalization, such as
    /// the `AND` separators inserted between chunks. Synthesized fragments
    /// have no meaningful source position.
    pub fn synthetic<S: Into<String>>(text: S) -> Self {
        Fragment::new(text, 0, 0)
    }

    /// The fragment text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Zero-based line of the fragment's first character.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Zero-based character offset of the fragment's first character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the fragment in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the fragment holds any text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// ASCII-case-insensitive comparison against a keyword such as `NOT`.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.text.eq_ignore_ascii_case(keyword)
    }

    /// Whether the fragment is a parenthesized group (retains its parens).
    pub fn is_group(&self) -> bool {
        self.text.starts_with('(')
    }

    /// Whether the fragment is a quoted phrase (retains its quotes).
    pub fn is_quoted(&self) -> bool {
        self.text.starts_with('"')
    }

    /// Strip one leading and one trailing delimiter character, advancing
    /// the position past the opening delimiter. Used for both `( ... )`
    /// groups and `" ... "` phrases.
    pub fn strip_delimiters(&self) -> Fragment {
        let mut chars = self.text.chars();
        chars.next();
        chars.next_back();
        Fragment::new(chars.as_str(), self.line, self.offset + 1)
    }

    /// Slice off a leading prefix of `n` characters, advancing the
    /// position accordingly. The prefix is assumed not to span lines.
    pub fn strip_prefix_chars(&self, n: usize) -> Fragment {
        let byte_at = self
            .text
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        Fragment::new(&self.text[byte_at..], self.line, self.offset + n)
    }

    /// Replace the fragment text, keeping its position. Used by the
    /// wildcard leniency pass when stripping interior `*` characters.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Fragment {
        Fragment::new(text, self.line, self.offset)
    }

    /// Merge this fragment with another, joined by an operator keyword.
    /// The merged fragment keeps this fragment's position.
    pub fn join(&self, keyword: &str, other: &Fragment) -> Fragment {
        Fragment::new(
            format!("{} {} {}", self.text, keyword, other.text),
            self.line,
            self.offset,
        )
    }

    /// Prefix this fragment with an operator keyword, keeping the position
    /// of the keyword's fragment.
    pub fn prefixed_by(&self, keyword: &str, position: &Fragment) -> Fragment {
        Fragment::new(
            format!("{} {}", keyword, self.text),
            position.line,
            position.offset,
        )
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_creation() {
        let frag = Fragment::new("hello", 2, 17);
        assert_eq!(frag.as_str(), "hello");
        assert_eq!(frag.line(), 2);
        assert_eq!(frag.offset(), 17);
        assert!(!frag.is_empty());
    }

    #[test]
    fn test_keyword_comparison() {
        assert!(Fragment::synthetic("not").is_keyword("NOT"));
        assert!(Fragment::synthetic("Or").is_keyword("OR"));
        assert!(!Fragment::synthetic("nothing").is_keyword("NOT"));
    }

    #[test]
    fn test_strip_delimiters() {
        let group = Fragment::new("(a b)", 0, 4);
        let inner = group.strip_delimiters();
        assert_eq!(inner.as_str(), "a b");
        assert_eq!(inner.offset(), 5);

        let phrase = Fragment::new("\"hi mom\"", 1, 0);
        let inner = phrase.strip_delimiters();
        assert_eq!(inner.as_str(), "hi mom");
        assert_eq!(inner.line(), 1);
        assert_eq!(inner.offset(), 1);
    }

    #[test]
    fn test_strip_prefix_chars() {
        let frag = Fragment::new("NOT missile", 0, 3);
        let rest = frag.strip_prefix_chars(4);
        assert_eq!(rest.as_str(), "missile");
        assert_eq!(rest.offset(), 7);
    }

    #[test]
    fn test_join_keeps_left_position() {
        let left = Fragment::new("hi", 0, 0);
        let right = Fragment::new("mom", 0, 6);
        let merged = left.join("OR", &right);
        assert_eq!(merged.as_str(), "hi OR mom");
        assert_eq!(merged.offset(), 0);
    }

    #[test]
    fn test_prefixed_by_keeps_keyword_position() {
        let keyword = Fragment::new("NOT", 1, 10);
        let operand = Fragment::new("toy", 1, 14);
        let merged = operand.prefixed_by("NOT", &keyword);
        assert_eq!(merged.as_str(), "NOT toy");
        assert_eq!(merged.line(), 1);
        assert_eq!(merged.offset(), 10);
    }

    #[test]
    fn test_multibyte_prefix_strip() {
        let frag = Fragment::new("汉语 x", 0, 0);
        let rest = frag.strip_prefix_chars(3);
        assert_eq!(rest.as_str(), "x");
        assert_eq!(rest.offset(), 3);
    }
}
