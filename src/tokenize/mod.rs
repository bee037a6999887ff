//! Tokenization of boolean keyword expressions.
//!
//! Two stages: [`split_tokens`] breaks raw text into positioned word,
//! quoted-phrase, and parenthesized-group fragments; [`tokenize`] then
//! normalizes operators over that sequence, merging `NOT x` and `x OR y`
//! into compound fragments and folding explicit and implicit `AND` into
//! synthesized separators. The parser re-enters [`tokenize`] for the
//! interior of each nested group.

pub mod fragment;
pub mod normalize;
pub mod splitter;

pub use self::fragment::Fragment;
pub use self::normalize::{combine_nots, combine_ors, tokenize};
pub use self::splitter::split_tokens;
