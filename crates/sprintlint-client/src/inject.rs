//! Scope-filter injection.
//!
//! Every fetch passes through [`inject_filters`], which AND-merges one
//! OR-group per active scope dimension onto whatever query the calling
//! check supplied. Checks therefore never see or reason about scope
//! filters; they express only their own intent.

use sprintlint_query::{
    BoolOp, InvalidTermFormat, QueryExpression, ITERATION_END_OP, ITERATION_START_OP,
};

use crate::attributes::{AttributeMap, FilterDimension};
use crate::scope::{IterationFilter, ScopeOptions, UnmappedDimension};

/// Build the final query for a fetch: the caller's query (possibly absent)
/// AND-combined with one group per active scope dimension, in the fixed
/// order owner, iteration, feature.
///
/// Dimensions with no attribute path for `entity_kind` are handled per
/// `scope.on_unmapped`: skipped individually, or (historical mode) the
/// whole injection aborts and the caller's query comes back unmodified.
/// Returns `None` only when no caller query was supplied and no dimension
/// contributed. Never touches the network.
pub fn inject_filters(
    entity_kind: &str,
    caller_query: Option<QueryExpression>,
    scope: &ScopeOptions,
    attrs: &AttributeMap,
) -> Result<Option<QueryExpression>, InvalidTermFormat> {
    let original = caller_query.clone();
    let mut acc = caller_query;

    if let Some(owners) = active_set(&scope.filter_owner) {
        match attrs.resolve(FilterDimension::Owner, entity_kind) {
            Some(path) => {
                let group = equality_group(path, owners)?;
                and_merge(&mut acc, &group);
            }
            None => {
                if scope.on_unmapped == UnmappedDimension::ReturnUnfiltered {
                    return Ok(original);
                }
            }
        }
    }

    if let Some(window) = scope.filter_iteration {
        match attrs.resolve(FilterDimension::Iteration, entity_kind) {
            Some(path) => {
                let group = iteration_window(path, window)?;
                and_merge(&mut acc, &group);
            }
            None => {
                if scope.on_unmapped == UnmappedDimension::ReturnUnfiltered {
                    return Ok(original);
                }
            }
        }
    }

    if let Some(features) = active_set(&scope.filter_feature) {
        match attrs.resolve(FilterDimension::Feature, entity_kind) {
            Some(path) => {
                let group = equality_group(path, features)?;
                and_merge(&mut acc, &group);
            }
            None => {
                if scope.on_unmapped == UnmappedDimension::ReturnUnfiltered {
                    return Ok(original);
                }
            }
        }
    }

    Ok(acc)
}

fn active_set(values: &Option<Vec<String>>) -> Option<&[String]> {
    match values.as_deref() {
        Some([]) | None => None,
        Some(vs) => Some(vs),
    }
}

/// One `path = value` term per value, OR-combined.
fn equality_group(path: &str, values: &[String]) -> Result<QueryExpression, InvalidTermFormat> {
    let mut group = QueryExpression::new();
    for value in values {
        group.or_term(&format!("{path} = {value}"))?;
    }
    Ok(group)
}

fn iteration_window(
    path: &str,
    window: IterationFilter,
) -> Result<QueryExpression, InvalidTermFormat> {
    let mut group = QueryExpression::new();
    match window {
        IterationFilter::Current => {
            group.and_term(&format!("{path}.StartDate {ITERATION_START_OP} today"))?;
            group.and_term(&format!("{path}.EndDate {ITERATION_END_OP} today"))?;
        }
        IterationFilter::Future => {
            group.and_term(&format!("{path}.EndDate {ITERATION_END_OP} today"))?;
        }
    }
    Ok(group)
}

fn and_merge(acc: &mut Option<QueryExpression>, group: &QueryExpression) {
    match acc {
        Some(q) => {
            q.add_expr(group, BoolOp::And);
        }
        None => *acc = Some(group.clone()),
    }
}
