//! Expression tree nodes and text matching.
//!
//! An [`Expr`] is a closed tagged enum over the four node kinds — `And`,
//! `Or`, `Not`, and `Term` — with exhaustive matching at every evaluation
//! site. Evaluation is a pure function of the node and the text: nothing
//! is cached or mutated, so a parsed tree can be shared freely across
//! threads.
//!
//! # Examples
//!
//! ```
//! use termsieve::parse;
//!
//! let tree = parse("missile AND NOT toy").unwrap();
//! assert!(tree.matches("a missile silo"));
//! assert!(!tree.matches("a toy missile"));
//! ```

use regex::Regex;

use crate::error::{ParseError, Result};
use crate::tokenize::Fragment;

/// Punctuation accepted after a term by the literal fallback scan, in
/// addition to whitespace and end-of-text.
const TRAILING_PUNCTUATION: [char; 4] = [',', '.', '\t', ' '];

/// A node in a parsed boolean keyword expression.
///
/// The root of a parsed tree is always an `And`, even for a single-term
/// expression, so downstream code sees a uniform shape. `And` and `Or`
/// hold an ordered list of children; the order never changes the truth
/// value but is preserved for re-serialization.
#[derive(Debug, Clone)]
pub enum Expr {
    /// True iff every child matches.
    And(Vec<Expr>),
    /// True iff any child matches.
    Or(Vec<Expr>),
    /// True iff the single child does not match.
    Not(Box<Expr>),
    /// A word or phrase leaf.
    Term(Term),
}

impl Expr {
    /// Evaluate this node against text.
    ///
    /// The text is assumed to be case-folded already; [`matches`] at the
    /// crate level folds both sides. `And` and `Or` short-circuit left to
    /// right. Evaluation never fails.
    ///
    /// [`matches`]: crate::expr::matches
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Expr::And(parts) => parts.iter().all(|part| part.matches(text)),
            Expr::Or(parts) => parts.iter().any(|part| part.matches(text)),
            Expr::Not(child) => !child.matches(text),
            Expr::Term(term) => term.matches(text),
        }
    }

    /// Structurally simplify this node in place without changing its truth
    /// value.
    ///
    /// Children are flattened first, then a same-kind child's children are
    /// absorbed into the parent and an `And`/`Or` wrapping a single term
    /// collapses to the term. The parser calls this periodically while
    /// resolving long operator chains and once at the end, so a chain of
    /// thousands of operators ends up as one shallow node.
    pub fn flatten(&mut self) {
        match self {
            Expr::And(parts) => {
                for part in parts.iter_mut() {
                    part.flatten();
                }
                let children = std::mem::take(parts);
                *parts = absorb(children, true);
            }
            Expr::Or(parts) => {
                for part in parts.iter_mut() {
                    part.flatten();
                }
                let children = std::mem::take(parts);
                *parts = absorb(children, false);
            }
            Expr::Not(child) => {
                child.flatten();
                let replacement = match &mut **child {
                    Expr::And(parts) | Expr::Or(parts)
                        if parts.len() == 1 && matches!(parts[0], Expr::Term(_)) =>
                    {
                        parts.pop()
                    }
                    _ => None,
                };
                if let Some(inner) = replacement {
                    **child = inner;
                }
            }
            Expr::Term(_) => {}
        }
    }

    /// Canonical re-serialization of this node.
    ///
    /// Multi-child `And`/`Or` nodes print as parenthesized joins, a
    /// single-child node prints as its child, negation prints as
    /// `NOT <child>`, and a leaf containing whitespace prints quoted. The
    /// output reparses to an equivalent tree.
    pub fn pretty(&self) -> String {
        match self {
            Expr::And(parts) => pretty_join(parts, "AND"),
            Expr::Or(parts) => pretty_join(parts, "OR"),
            Expr::Not(child) => format!("NOT {}", child.pretty()),
            Expr::Term(term) => term.pretty(),
        }
    }
}

fn pretty_join(parts: &[Expr], word: &str) -> String {
    match parts {
        [] => String::new(),
        [only] => only.pretty(),
        many => {
            let joined = many
                .iter()
                .map(Expr::pretty)
                .collect::<Vec<_>>()
                .join(&format!(" {word} "));
            format!("({joined})")
        }
    }
}

/// Absorb flattened children into a parent of the given kind.
fn absorb(children: Vec<Expr>, and_parent: bool) -> Vec<Expr> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Expr::And(inner) if and_parent => out.extend(inner),
            Expr::Or(inner) if !and_parent => out.extend(inner),
            Expr::And(mut inner) | Expr::Or(mut inner)
                if inner.len() == 1 && matches!(inner[0], Expr::Term(_)) =>
            {
                out.extend(inner.pop());
            }
            other => out.push(other),
        }
    }
    out
}

/// A word or phrase leaf with its precompiled matching pattern.
///
/// The source text is kept quote-stripped but otherwise verbatim,
/// trailing wildcard included, so the leaf re-serializes and falls back
/// to literal scanning exactly as written.
#[derive(Debug, Clone)]
pub struct Term {
    /// Quote-stripped source text of the leaf.
    text: String,
    /// Whether the term ends in `*` and matches as a prefix.
    prefix: bool,
    /// Case-insensitive literal pattern over the `*`-stripped stem.
    pattern: Regex,
}

impl Term {
    /// Build a leaf from a normalized fragment, stripping surrounding
    /// quotes if present and precompiling the match pattern.
    pub fn new(fragment: &Fragment) -> Result<Self> {
        let source = if fragment.is_quoted() {
            fragment.strip_delimiters()
        } else {
            fragment.clone()
        };
        let text = source.as_str().to_string();
        let prefix = text.ends_with('*');
        let stem = text.trim_end_matches('*');
        let pattern = Regex::new(&format!("(?i){}", regex::escape(stem)))
            .map_err(|_| ParseError::MalformedInput {
                offset: fragment.offset(),
            })?;
        Ok(Term {
            text,
            prefix,
            pattern,
        })
    }

    /// The quote-stripped source text, trailing wildcard included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this term matches as a prefix.
    pub fn is_prefix(&self) -> bool {
        self.prefix
    }

    /// Test this term against case-folded text.
    ///
    /// The boundary-anchored pass runs first. If it finds nothing, the
    /// literal fallback scans for exact occurrences of the term flanked by
    /// whitespace or simple punctuation — terms built from symbols or from
    /// scripts with no word-boundary notion fail the anchored pass even
    /// when plainly present. The fallback never runs first.
    pub fn matches(&self, text: &str) -> bool {
        self.boundary_match(text) || self.literal_fallback(text)
    }

    /// Boundary-anchored search: the term must be flanked on the left by a
    /// word break or a non-word character, and on the right likewise
    /// unless it is a prefix term.
    fn boundary_match(&self, text: &str) -> bool {
        let stem_len = self.text.trim_end_matches('*').len();
        if stem_len == 0 {
            // A pure-wildcard term is a prefix of anything.
            return true;
        }
        for found in self.pattern.find_iter(text) {
            let first = match found.as_str().chars().next() {
                Some(c) => c,
                None => continue,
            };
            let last = match found.as_str().chars().next_back() {
                Some(c) => c,
                None => continue,
            };
            let before = text[..found.start()].chars().next_back();
            let after = text[found.end()..].chars().next();
            if left_anchored(before, first) && (self.prefix || right_anchored(last, after)) {
                return true;
            }
        }
        false
    }

    /// Literal scan accepting an occurrence flanked by start/whitespace on
    /// the left and end/whitespace/punctuation on the right.
    fn literal_fallback(&self, text: &str) -> bool {
        for (beg, found) in text.match_indices(&self.text) {
            let end = beg + found.len();
            let before_ok =
                beg == 0 || text[..beg].chars().next_back().is_some_and(char::is_whitespace);
            let after_ok = end == text.len()
                || text[end..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c));
            if before_ok && after_ok {
                return true;
            }
        }
        false
    }

    fn pretty(&self) -> String {
        if self.text.chars().any(char::is_whitespace) {
            format!("\"{}\"", self.text)
        } else {
            self.text.clone()
        }
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Left anchor: at start of text a word break requires a word character;
/// otherwise the previous character must be non-word, or the edge must be
/// a word/non-word transition.
fn left_anchored(before: Option<char>, first: char) -> bool {
    match before {
        None => is_word(first),
        Some(prev) => !is_word(prev) || !is_word(first),
    }
}

/// Right anchor, mirror of [`left_anchored`].
fn right_anchored(last: char, after: Option<char>) -> bool {
    match after {
        None => is_word(last),
        Some(next) => !is_word(next) || !is_word(last),
    }
}
