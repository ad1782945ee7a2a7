//! Atomic predicate clauses.
//!
//! A [`Term`] is one comparison the backend understands: exactly three
//! tokens separated by single spaces, `<field-path> <operator> <value>`.
//! Tokens never contain whitespace or parentheses — parenthesization is the
//! builder's job ([`crate::QueryExpression`]), never the caller's. A term
//! that fails this shape is rejected at construction; nothing malformed is
//! ever carried forward into a rendered query.

use nom::{
    bytes::complete::take_while1,
    character::complete::char as pchar,
    combinator::all_consuming,
    sequence::tuple,
    IResult,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a raw term string does not have the `field op value` shape.
///
/// This is a programming error in the calling check, not a recoverable
/// condition: the offending string is carried for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid term format: {candidate:?} (expected `field op value`, three tokens, single spaces, no parentheses)")]
pub struct InvalidTermFormat {
    pub candidate: String,
}

/// Boolean connective used when folding terms into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn keyword(self) -> &'static str {
        match self {
            BoolOp::And => "AND",
            BoolOp::Or => "OR",
        }
    }
}

/// A validated comparison clause, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(String);

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '(' && c != ')')(input)
}

fn term_shape(input: &str) -> IResult<&str, (&str, char, &str, char, &str)> {
    all_consuming(tuple((token, pchar(' '), token, pchar(' '), token)))(input)
}

impl Term {
    /// Validate and construct a term. Rejects missing or irregular spacing,
    /// leading/trailing whitespace, and any parenthesis character.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidTermFormat> {
        let raw = raw.into();
        match term_shape(&raw) {
            Ok(_) => Ok(Term(raw)),
            Err(_) => Err(InvalidTermFormat { candidate: raw }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
