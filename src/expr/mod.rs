//! Expression trees: construction, matching, and re-serialization.

pub mod node;
pub mod parser;

pub use self::node::{Expr, Term};
pub use self::parser::{matches, parse};
