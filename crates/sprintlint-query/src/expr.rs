//! Boolean predicate composition.
//!
//! [`QueryExpression`] holds one rendered-string accumulator. Every fold
//! wraps the *whole* accumulated predicate and the new term in parentheses
//! before joining them with `AND`/`OR`, including same-operator chains:
//!
//! ```text
//! a
//! (a) AND (b)
//! ((a) AND (b)) AND (c)
//! ```
//!
//! The backend applies no precedence rules of its own, so this per-step
//! wrapping is the contract — flattening `a AND b AND c` into one variadic
//! group would change the shape the backend sees. Mixed `AND`/`OR` folds
//! are legal and stay unambiguous for the same reason.

use serde::{Deserialize, Serialize};

use crate::term::{BoolOp, InvalidTermFormat, Term};

/// Comparison operator for the start of an iteration window.
///
/// The iteration boundary is inclusive: a run on the boundary day counts as
/// inside the iteration. Both the `current_iteration` shortcut and the
/// scope-filter injector read these constants, so the boundary semantics
/// cannot drift between call sites.
pub const ITERATION_START_OP: &str = "<=";
/// Comparison operator for the end of an iteration window. See
/// [`ITERATION_START_OP`].
pub const ITERATION_END_OP: &str = ">=";

/// A composable boolean predicate over [`Term`]s and nested expressions.
///
/// Lifecycle: built by a check or the filter injector, mutated by repeated
/// term additions, rendered once, discarded. Instances are never shared
/// across fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryExpression {
    rendered: Option<String>,
}

impl QueryExpression {
    /// An empty expression; [`render`](Self::render) returns `None` until a
    /// term is added.
    pub fn new() -> Self {
        QueryExpression { rendered: None }
    }

    /// Construct from a single raw term, validating it first.
    pub fn from_term(raw: &str) -> Result<Self, InvalidTermFormat> {
        let mut q = QueryExpression::new();
        q.push(Term::new(raw)?, BoolOp::And);
        Ok(q)
    }

    /// Construct by folding a collection of raw terms left to right with
    /// `op`. Every element is validated before any is merged.
    pub fn from_terms<'a, I>(raws: I, op: BoolOp) -> Result<Self, InvalidTermFormat>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut q = QueryExpression::new();
        q.add_terms(raws, op)?;
        Ok(q)
    }

    /// Shortcut: the two AND'd terms restricting to the iteration that
    /// contains `today` (backend-interpreted date literal). The result is
    /// an ordinary expression and can be absorbed into any other query.
    pub fn current_iteration() -> Self {
        let mut q = QueryExpression::new();
        q.fold_raw(
            &format!("Iteration.StartDate {ITERATION_START_OP} today"),
            BoolOp::And,
        );
        q.fold_raw(
            &format!("Iteration.EndDate {ITERATION_END_OP} today"),
            BoolOp::And,
        );
        q
    }

    /// Fold one validated term into the accumulator.
    pub fn push(&mut self, term: Term, op: BoolOp) -> &mut Self {
        self.fold_raw(term.as_str(), op);
        self
    }

    /// Validate `raw` and fold it in with `op`. Chainable.
    pub fn add_term(&mut self, raw: &str, op: BoolOp) -> Result<&mut Self, InvalidTermFormat> {
        let term = Term::new(raw)?;
        Ok(self.push(term, op))
    }

    /// Validate every element of `raws`, then fold them in left to right
    /// with `op`. Nothing is merged if any element is malformed.
    pub fn add_terms<'a, I>(&mut self, raws: I, op: BoolOp) -> Result<&mut Self, InvalidTermFormat>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let terms = raws
            .into_iter()
            .map(Term::new)
            .collect::<Result<Vec<_>, _>>()?;
        for term in terms {
            self.fold_raw(term.as_str(), op);
        }
        Ok(self)
    }

    /// AND-fold a raw term; matches the predicate language's most common
    /// composition.
    pub fn and_term(&mut self, raw: &str) -> Result<&mut Self, InvalidTermFormat> {
        self.add_term(raw, BoolOp::And)
    }

    /// OR-fold a raw term.
    pub fn or_term(&mut self, raw: &str) -> Result<&mut Self, InvalidTermFormat> {
        self.add_term(raw, BoolOp::Or)
    }

    /// Absorb another expression as one opaque sub-term: its rendered form
    /// is substituted verbatim and the fold wraps it in one more layer.
    /// Absorbing an empty expression is a no-op.
    pub fn add_expr(&mut self, other: &QueryExpression, op: BoolOp) -> &mut Self {
        if let Some(sub) = other.render() {
            let sub = sub.to_string();
            self.fold_raw(&sub, op);
        }
        self
    }

    /// The accumulated predicate string, or `None` if no term was ever
    /// added. Idempotent; repeated calls return the same string until the
    /// next fold.
    pub fn render(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_none()
    }

    // The folding rule. First insertion is the raw term text; afterwards
    // the previous whole accumulator and the new term are each wrapped.
    fn fold_raw(&mut self, term: &str, op: BoolOp) {
        self.rendered = Some(match self.rendered.take() {
            None => term.to_string(),
            Some(acc) => format!("({acc}) {} ({term})", op.keyword()),
        });
    }
}
