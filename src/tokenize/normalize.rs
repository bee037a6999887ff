//! Operator normalization over raw fragments.
//!
//! Runs after [`split_tokens`](crate::tokenize::split_tokens) and turns the
//! raw fragment sequence into a uniform operand/operator stream: `NOT x`
//! and `x OR y` become single compound fragments, explicit and implicit
//! `AND`s fold into synthesized `AND` separators, and the legacy wildcard
//! leniencies are applied.
//!
//! The OR merge happens here, on same-depth adjacent fragments, before the
//! parser ever sees an operator. Saved filters depend on the precedence
//! this produces in combination with the parser's AND-before-OR
//! resolution, so the staging must not be reordered.

use crate::error::{ParseError, Result};
use crate::tokenize::fragment::Fragment;
use crate::tokenize::splitter::split_tokens;

/// Merge each `NOT` keyword with the fragment that follows it.
///
/// The compound keeps the `NOT` keyword's position. A `NOT` with nothing
/// following is an error.
pub fn combine_nots(frags: Vec<Fragment>) -> Result<Vec<Fragment>> {
    let mut parts = Vec::with_capacity(frags.len());
    let mut iter = frags.into_iter();
    while let Some(top) = iter.next() {
        if top.is_keyword("NOT") {
            let operand = iter.next().ok_or(ParseError::TrailingNot {
                line: top.line(),
                offset: top.offset(),
            })?;
            parts.push(operand.prefixed_by("NOT", &top));
        } else {
            parts.push(top);
        }
    }
    Ok(parts)
}

/// Merge each `OR` keyword with the fragments on either side of it.
///
/// The compound keeps the left operand's position. Chained ORs collapse
/// into a single compound (`a OR b OR c`). An `OR` missing either operand
/// is an error.
pub fn combine_ors(frags: Vec<Fragment>) -> Result<Vec<Fragment>> {
    let mut parts: Vec<Fragment> = Vec::with_capacity(frags.len());
    let mut iter = frags.into_iter();
    while let Some(top) = iter.next() {
        if top.is_keyword("OR") {
            let right = iter.next().ok_or(ParseError::BareOr {
                offset: top.offset(),
            })?;
            let left = parts.pop().ok_or(ParseError::BareOr {
                offset: top.offset(),
            })?;
            parts.push(left.join("OR", &right));
        } else {
            parts.push(top);
        }
    }
    Ok(parts)
}

/// Apply the legacy wildcard leniencies.
///
/// A fragment that is exactly `*` becomes empty and is dropped later; a
/// fragment containing `*` anywhere but at the end has every `*` stripped.
/// Neither is an error — previously authored filters rely on this. A
/// fragment that does end with `*` is left untouched, interior stars
/// included.
fn apply_wildcard_leniency(frags: Vec<Fragment>) -> Vec<Fragment> {
    frags
        .into_iter()
        .map(|frag| {
            let text = frag.as_str();
            if text == "*" {
                frag.with_text("")
            } else if text.contains('*') && !text.ends_with('*') {
                let stripped: String = text.chars().filter(|&c| c != '*').collect();
                frag.with_text(stripped)
            } else {
                frag
            }
        })
        .collect()
}

/// Full tokenization and normalization of an expression fragment.
///
/// Splits the input, merges NOTs, applies wildcard leniency, merges ORs,
/// drops empty fragments and explicit `AND` keywords, then re-tokenizes
/// each remaining chunk (resolving NOTs that ended up inside an OR-merged
/// compound) and joins the chunks with synthesized `AND` separators.
///
/// An input that normalizes to nothing (for example a bare `*`) yields an
/// empty sequence, not an error.
///
/// # Examples
///
/// ```
/// use termsieve::tokenize::{tokenize, Fragment};
///
/// let parts = tokenize(&Fragment::new("this that", 0, 0)).unwrap();
/// let texts: Vec<&str> = parts.iter().map(|p| p.as_str()).collect();
/// assert_eq!(texts, vec!["this", "AND", "that"]);
/// ```
pub fn tokenize(input: &Fragment) -> Result<Vec<Fragment>> {
    let toks = combine_nots(split_tokens(input)?)?;
    if toks.is_empty() {
        return Ok(toks);
    }
    let toks = apply_wildcard_leniency(toks);
    let chunks = combine_ors(toks)?;

    let mut parts = Vec::with_capacity(chunks.len() * 2);
    for chunk in chunks {
        if chunk.is_empty() || chunk.is_keyword("AND") {
            continue;
        }
        parts.extend(combine_nots(split_tokens(&chunk)?)?);
        parts.push(Fragment::synthetic("AND"));
    }
    parts.pop();
    Ok(parts)
}
