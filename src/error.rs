//! Error types for the termsieve library.
//!
//! All parse failures are represented by the [`ParseError`] enum. Every
//! variant carries the character offset of the offending input, counted in
//! characters from the start of the original expression, so callers can
//! point a user at the exact spot in a saved filter.
//!
//! Evaluation never fails: once an expression has parsed, matching it
//! against text always produces a boolean.
//!
//! # Examples
//!
//! ```
//! use termsieve::parse;
//!
//! let err = parse("(missile AND toy").unwrap_err();
//! assert_eq!(err.offset(), 0);
//! assert!(err.to_string().contains("parenthesis"));
//! ```

use thiserror::Error;

/// The error type for expression parsing.
///
/// Uses the `thiserror` crate for the `Error` trait implementation. The
/// wildcard leniencies are deliberately absent from this taxonomy: a bare
/// `*` token and interior `*` characters are silently dropped during
/// normalization, never raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `(` was never closed before the end of input.
    #[error("mismatched parenthesis starting at character {offset}")]
    UnmatchedOpenParen { offset: usize },

    /// A `)` appeared with no matching open parenthesis.
    #[error("mismatched closing parenthesis at character {offset}")]
    UnmatchedCloseParen { offset: usize },

    /// A `"` was never closed before the end of input.
    #[error("mismatched quotes starting at character {offset}")]
    UnmatchedQuote { offset: usize },

    /// A `NOT` keyword with no operand following it.
    #[error("trailing NOT on line {line}")]
    TrailingNot { line: u32, offset: usize },

    /// An `OR` keyword with no operand on one side of it.
    #[error("bare OR missing an operand at character {offset}")]
    BareOr { offset: usize },

    /// Tokenizer state that should be unreachable for any input.
    #[error("unparsable expression at character {offset}")]
    MalformedInput { offset: usize },
}

/// Result type alias for operations that may fail with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

impl ParseError {
    /// Character offset into the original expression where the error was
    /// detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnmatchedOpenParen { offset }
            | ParseError::UnmatchedCloseParen { offset }
            | ParseError::UnmatchedQuote { offset }
            | ParseError::TrailingNot { offset, .. }
            | ParseError::BareOr { offset }
            | ParseError::MalformedInput { offset } => *offset,
        }
    }
}
