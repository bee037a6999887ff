//! Expression parsing: token sequence to tree.
//!
//! Stage 1 turns each normalized fragment into a leaf, an operator marker,
//! or — recursively — a subtree for a parenthesized group. Stage 2 resolves
//! the markers iteratively, all `AND`s then all `OR`s, each pass a single
//! left-associative sweep. Operator resolution deliberately never recurses:
//! saved filters chain hundreds of terms, and a recursive resolver falls
//! over at around a hundred of them. Only group nesting recurses, bounded
//! by the input's parenthesis depth.

use crate::error::{ParseError, Result};
use crate::expr::node::{Expr, Term};
use crate::tokenize::{Fragment, tokenize};

/// How many operator combinations to allow between structural flattenings.
/// Flattening after every merge would be quadratic on long chains; never
/// flattening nests one node per operator.
const FLATTEN_INTERVAL: usize = 200;

/// Operator markers surviving normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
}

/// One element of the stage-1 output sequence.
#[derive(Debug)]
enum Part {
    Marker { op: Op, offset: usize },
    Node(Expr),
}

/// Parse a keyword expression into a tree.
///
/// The root is always an [`Expr::And`], even for a single term. The tree
/// is freshly built on every call; nothing is cached.
///
/// Matching with the returned tree is case-sensitive on the tree's own
/// terms; use [`matches`] to fold both sides.
///
/// # Examples
///
/// ```
/// use termsieve::parse;
///
/// let tree = parse("\"space shuttle\" OR (missile AND NOT toy)").unwrap();
/// assert!(tree.matches("the space shuttle launch"));
/// assert!(!tree.matches("a toy missile"));
/// ```
pub fn parse(pattern: &str) -> Result<Expr> {
    parse_fragment(&Fragment::new(pattern, 0, 0))
}

/// Case-fold both pattern and text, parse, and evaluate once.
///
/// # Examples
///
/// ```
/// use termsieve::matches;
///
/// assert!(matches("Missile AND NOT toy", "MISSILE sighted").unwrap());
/// assert!(!matches("a b", "only b here").unwrap());
/// ```
pub fn matches(pattern: &str, text: &str) -> Result<bool> {
    let tree = parse(&pattern.to_lowercase())?;
    Ok(tree.matches(&text.to_lowercase()))
}

/// Recursive entry point: called at the top level and for the interior of
/// each parenthesized group.
fn parse_fragment(fragment: &Fragment) -> Result<Expr> {
    let sequence = build_sequence(&trim_fragment(fragment))?;
    resolve_operators(sequence)
}

/// Trim surrounding whitespace, advancing the position past what was
/// trimmed from the front.
fn trim_fragment(fragment: &Fragment) -> Fragment {
    let mut line = fragment.line();
    let mut leading = 0;
    for c in fragment.as_str().chars() {
        if !c.is_whitespace() {
            break;
        }
        if c == '\n' {
            line += 1;
        }
        leading += 1;
    }
    Fragment::new(fragment.as_str().trim(), line, fragment.offset() + leading)
}

/// Stage 1: leaves, groups, and markers.
fn build_sequence(fragment: &Fragment) -> Result<Vec<Part>> {
    let frags = tokenize(fragment)?;
    let mut sequence = Vec::with_capacity(frags.len());
    for frag in frags {
        let part = if frag.is_group() {
            Part::Node(parse_fragment(&frag.strip_delimiters())?)
        } else if frag.as_str() == "AND" {
            Part::Marker {
                op: Op::And,
                offset: frag.offset(),
            }
        } else if frag.as_str() == "OR" {
            Part::Marker {
                op: Op::Or,
                offset: frag.offset(),
            }
        } else if frag.as_str().starts_with("NOT ") {
            let operand = frag.strip_prefix_chars(4);
            Part::Node(Expr::Not(Box::new(parse_fragment(&operand)?)))
        } else {
            Part::Node(Expr::Term(Term::new(&frag)?))
        };
        sequence.push(part);
    }
    Ok(sequence)
}

/// Stage 2: iterative operator resolution, `AND` before `OR`.
fn resolve_operators(mut sequence: Vec<Part>) -> Result<Expr> {
    let mut combinations = 0usize;
    for current in [Op::And, Op::Or] {
        let mut out: Vec<Part> = Vec::with_capacity(sequence.len());
        let mut iter = sequence.into_iter();
        while let Some(part) = iter.next() {
            match part {
                Part::Marker { op, offset } if op == current => {
                    let left = take_operand(out.pop(), current, offset)?;
                    let right = take_operand(iter.next(), current, offset)?;
                    let mut node = match current {
                        Op::And => Expr::And(vec![left, right]),
                        Op::Or => Expr::Or(vec![left, right]),
                    };
                    combinations += 1;
                    if combinations % FLATTEN_INTERVAL == 0 {
                        node.flatten();
                    }
                    out.push(Part::Node(node));
                }
                other => out.push(other),
            }
        }
        sequence = out;
    }

    let operands = sequence
        .into_iter()
        .map(|part| match part {
            Part::Node(node) => Ok(node),
            Part::Marker { offset, .. } => Err(ParseError::MalformedInput { offset }),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut root = Expr::And(operands);
    root.flatten();
    Ok(root)
}

/// Unwrap an operand position; a missing or operator-occupied position is
/// a bare `OR` (the synthesized `AND` separators always have operands).
fn take_operand(part: Option<Part>, current: Op, marker_offset: usize) -> Result<Expr> {
    match part {
        Some(Part::Node(node)) => Ok(node),
        Some(Part::Marker { offset, .. }) => Err(ParseError::BareOr { offset }),
        None => match current {
            Op::Or => Err(ParseError::BareOr {
                offset: marker_offset,
            }),
            Op::And => Err(ParseError::MalformedInput {
                offset: marker_offset,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_and() {
        assert!(matches!(parse("hello").unwrap(), Expr::And(_)));
        assert!(matches!(parse("a OR b").unwrap(), Expr::And(_)));
        assert!(matches!(parse("").unwrap(), Expr::And(_)));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let tree = parse("").unwrap();
        assert!(tree.matches("anything"));
        assert!(tree.matches(""));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        // "a OR b AND c" resolves as a OR (b AND c).
        let tree = parse("a OR b AND c").unwrap();
        assert!(tree.matches("a"));
        assert!(tree.matches("b c"));
        assert!(!tree.matches("b"));
        assert!(!tree.matches("c"));
    }

    #[test]
    fn test_groups_override_precedence() {
        let tree = parse("(hi and mom) or hello").unwrap();
        assert!(tree.matches("hello"));
        assert!(tree.matches("hi mom"));
        assert!(!tree.matches("hi"));
    }

    #[test]
    fn test_not_wraps_groups_and_phrases() {
        let tree = parse("NOT (bob smith)").unwrap();
        assert!(tree.matches("alice jones"));
        assert!(!tree.matches("bob smith"));
        assert!(tree.matches("bob jones"));

        let tree = parse("NOT \"bob smith\"").unwrap();
        assert!(!tree.matches("bob smith"));
        assert!(tree.matches("bob jones smith"));
    }

    #[test]
    fn test_pretty_round_trip() {
        let tree = parse("\"space shuttle\" OR (missile AND NOT toy)").unwrap();
        let printed = tree.pretty();
        let reparsed = parse(&printed).unwrap();
        for text in [
            "space shuttle",
            "missile",
            "toy missile",
            "shuttle",
            "space shuttle toy",
        ] {
            assert_eq!(tree.matches(text), reparsed.matches(text), "text: {text}");
        }
        assert_eq!(reparsed.pretty(), printed);
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(
            parse("(a").unwrap_err(),
            ParseError::UnmatchedOpenParen { offset: 0 }
        );
        assert_eq!(
            parse("\"a").unwrap_err(),
            ParseError::UnmatchedQuote { offset: 0 }
        );
        assert_eq!(
            parse("a)").unwrap_err(),
            ParseError::UnmatchedCloseParen { offset: 1 }
        );
        assert!(matches!(
            parse("a OR OR b").unwrap_err(),
            ParseError::BareOr { .. }
        ));
        assert!(matches!(
            parse("NOT").unwrap_err(),
            ParseError::TrailingNot { .. }
        ));
        assert!(matches!(parse("a OR").unwrap_err(), ParseError::BareOr { .. }));
        assert!(matches!(parse("OR a").unwrap_err(), ParseError::BareOr { .. }));
    }

    #[test]
    fn test_wildcard_leniency_never_raises() {
        assert!(parse("*hive").is_ok());
        assert!(parse("*").is_ok());
        assert!(parse("one * four").is_ok());
    }

    #[test]
    fn test_trim_keeps_position() {
        let trimmed = trim_fragment(&Fragment::new("  \n a b ", 0, 0));
        assert_eq!(trimmed.as_str(), "a b");
        assert_eq!(trimmed.line(), 1);
        assert_eq!(trimmed.offset(), 4);
    }

    #[test]
    fn test_deep_or_merge_inside_group() {
        // OR-merge at tokenization and AND-before-OR at resolution combine
        // over nested fixtures.
        let tree = parse("((a AND b) OR c) AND d").unwrap();
        assert!(tree.matches("a b d"));
        assert!(tree.matches("c d"));
        assert!(!tree.matches("a b"));
        assert!(!tree.matches("d"));
    }
}
