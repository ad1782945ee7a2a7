//! Run-wide scope options.
//!
//! Populated once from the command line before any check runs and read-only
//! afterwards. Every fetch in the run sees the same scope.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when the configured iteration filter is neither `current` nor
/// `future`. Fatal: the run-wide configuration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown iteration filter {value:?} (expected `current` or `future`)")]
pub struct UnknownIterationFilter {
    pub value: String,
}

/// Which iteration window fetched entities must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IterationFilter {
    /// The iteration containing `today`.
    Current,
    /// Any iteration that has not yet ended.
    Future,
}

impl FromStr for IterationFilter {
    type Err = UnknownIterationFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(IterationFilter::Current),
            "future" => Ok(IterationFilter::Future),
            other => Err(UnknownIterationFilter {
                value: other.to_string(),
            }),
        }
    }
}

/// What the filter injector does when a scope dimension has no attribute
/// path for the entity kind being fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedDimension {
    /// Skip only the unmapped dimension and keep evaluating the rest.
    #[default]
    SkipDimension,
    /// Abort injection at the first unmapped dimension and return the
    /// caller's query unmodified. Historical behavior, kept selectable for
    /// byte-compatible query strings.
    ReturnUnfiltered,
}

/// The cross-cutting filters applied to every fetch in a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeOptions {
    /// Restrict to artifacts owned by these user names.
    pub filter_owner: Option<Vec<String>>,
    /// Restrict to an iteration window.
    pub filter_iteration: Option<IterationFilter>,
    /// Restrict to these feature identifiers.
    pub filter_feature: Option<Vec<String>>,
    /// Unmapped-dimension policy; see [`UnmappedDimension`].
    pub on_unmapped: UnmappedDimension,
}

impl ScopeOptions {
    /// A scope with no filters at all; injection is then the identity.
    pub fn unfiltered() -> Self {
        ScopeOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_iteration_filters() {
        assert_eq!("current".parse(), Ok(IterationFilter::Current));
        assert_eq!("future".parse(), Ok(IterationFilter::Future));
    }

    #[test]
    fn rejects_unknown_iteration_filter() {
        let err = "last-week".parse::<IterationFilter>().unwrap_err();
        assert_eq!(err.value, "last-week");
        // Case-sensitive on purpose: the accepted literals are exact.
        assert!("Current".parse::<IterationFilter>().is_err());
    }

    #[test]
    fn default_policy_skips_unmapped_dimensions() {
        assert_eq!(
            ScopeOptions::unfiltered().on_unmapped,
            UnmappedDimension::SkipDimension
        );
    }
}
