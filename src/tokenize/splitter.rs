//! Raw expression splitting.
//!
//! Breaks expression text into word, quoted-phrase, and parenthesized-group
//! fragments. Quotes and parentheses are retained on the fragments they
//! delimit; the parser strips them later. Whitespace splits fragments only
//! outside every quote and parenthesis.

use crate::error::{ParseError, Result};
use crate::tokenize::fragment::Fragment;

/// An open delimiter on the scan stack, with the absolute character offset
/// where it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Quote(usize),
    Paren(usize),
}

/// Split expression text into positioned fragments.
///
/// Each returned fragment is a bare word, a quoted phrase (quotes
/// retained), or a fully parenthesized group (parentheses retained).
/// Within a quote, whitespace and parentheses are inert; within a
/// parenthesized group, whitespace does not split. Newlines advance the
/// line counter used for diagnostics.
///
/// The input fragment's line and offset seed the scan so positions stay
/// absolute when the parser re-enters for nested groups.
///
/// # Examples
///
/// ```
/// use termsieve::tokenize::{split_tokens, Fragment};
///
/// let parts = split_tokens(&Fragment::new("a \"b c\" (d e)", 0, 0)).unwrap();
/// let texts: Vec<&str> = parts.iter().map(|p| p.as_str()).collect();
/// assert_eq!(texts, vec!["a", "\"b c\"", "(d e)"]);
/// ```
pub fn split_tokens(input: &Fragment) -> Result<Vec<Fragment>> {
    let mut scan = Scan::new(input);
    for (i, c) in input.as_str().chars().enumerate() {
        scan.step(i, c)?;
    }
    scan.finish()
}

/// Scan state for one pass over the input.
struct Scan {
    parts: Vec<Fragment>,
    stack: Vec<Delimiter>,
    curr: String,
    curr_line: u32,
    curr_offset: usize,
    line: u32,
    start: usize,
}

impl Scan {
    fn new(input: &Fragment) -> Self {
        Scan {
            parts: Vec::new(),
            stack: Vec::new(),
            curr: String::new(),
            curr_line: input.line(),
            curr_offset: input.offset(),
            line: input.line(),
            start: input.offset(),
        }
    }

    /// Close the current fragment, if any, and restart at `offset`.
    fn break_token(&mut self, offset: usize) {
        if !self.curr.is_empty() {
            let text = std::mem::take(&mut self.curr);
            self.parts
                .push(Fragment::new(text, self.curr_line, self.curr_offset));
        }
        self.curr_line = self.line;
        self.curr_offset = offset;
    }

    fn step(&mut self, i: usize, c: char) -> Result<()> {
        let abs = self.start + i;
        if c == '\n' {
            self.line += 1;
        }
        if c.is_whitespace() && self.stack.is_empty() {
            self.break_token(abs + 1);
            return Ok(());
        }
        if c == '(' && self.stack.is_empty() && !self.curr.is_empty() {
            // A group opening mid-word starts a fresh fragment.
            self.break_token(abs);
        }
        self.curr.push(c);

        match (c, self.stack.last().copied()) {
            // Inside a quote everything but the closing quote is inert.
            ('"', Some(Delimiter::Quote(_))) => {
                self.stack.pop();
            }
            (_, Some(Delimiter::Quote(_))) => {}
            ('"', _) => self.stack.push(Delimiter::Quote(abs)),
            ('(', _) => self.stack.push(Delimiter::Paren(abs)),
            (')', Some(Delimiter::Paren(_))) => {
                self.stack.pop();
                if self.stack.is_empty() {
                    self.break_token(abs + 1);
                }
            }
            (')', _) => {
                return Err(ParseError::UnmatchedCloseParen { offset: abs });
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Fragment>> {
        self.break_token(0);
        match self.stack.last().copied() {
            None => Ok(self.parts),
            Some(Delimiter::Quote(offset)) => Err(ParseError::UnmatchedQuote { offset }),
            Some(Delimiter::Paren(offset)) => Err(ParseError::UnmatchedOpenParen { offset }),
        }
    }
}
