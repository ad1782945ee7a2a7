//! Sprintlint query language
//!
//! The tracking service accepts a single flat string predicate per request:
//! parenthesized comparison clauses joined by the literal keywords `AND` /
//! `OR`. This crate defines the two pieces every check and every scope
//! filter builds that string with:
//!
//! - [`Term`]: one validated comparison clause (`field op value`)
//! - [`QueryExpression`]: a composable boolean predicate over terms and
//!   nested expressions
//!
//! Operator precedence is carried entirely by parenthesization: every
//! composition step wraps the whole accumulated predicate and the new term
//! before joining them, so the backend never has to apply precedence rules.

pub mod expr;
pub mod term;

pub use expr::{QueryExpression, ITERATION_END_OP, ITERATION_START_OP};
pub use term::{BoolOp, InvalidTermFormat, Term};
