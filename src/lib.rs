//! # termsieve
//!
//! Boolean keyword expression matching for filtering free text against
//! saved search and alert criteria.
//!
//! An expression like `"space shuttle" OR (missile AND NOT toy)` is parsed
//! into a tree and evaluated against a block of text. Matching is
//! case-insensitive, word-boundary aware, and supports quoted phrases,
//! parenthesized groups, explicit and implicit `AND`, and trailing `*`
//! wildcards. Legacy wildcard misuse (a bare `*`, or `*` in the middle of
//! a word) is silently tolerated for compatibility with previously
//! authored filters.
//!
//! ## Example
//!
//! ```
//! use termsieve::{matches, parse};
//!
//! assert!(matches("missile AND NOT toy", "Missile test today").unwrap());
//! assert!(!matches("missile AND NOT toy", "a toy missile").unwrap());
//!
//! // Or parse once and evaluate against case-folded text.
//! let tree = parse("\"space shuttle\" OR satellite").unwrap();
//! assert!(tree.matches("the space shuttle program"));
//! ```
//!
//! Parsing is a one-shot pure computation: failures abort with a
//! [`ParseError`] carrying the offending character offset, and a
//! successfully parsed tree never fails to evaluate.

pub mod error;
pub mod expr;
pub mod tokenize;

pub use error::{ParseError, Result};
pub use expr::{Expr, Term, matches, parse};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
