//! Per-entity-kind attribute paths for scope filtering.
//!
//! Each scope-filter dimension compares against a different dotted field
//! path depending on the entity kind being fetched: a story's owner is
//! `Owner.UserName`, a capacity record's is `User.UserName`, a `User`
//! record filters on its own `UserName`. A missing entry means the
//! dimension does not apply to that kind at all; the filter injector skips
//! it rather than erroring.

use std::collections::BTreeMap;

/// A cross-cutting scope-filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterDimension {
    Owner,
    Iteration,
    Feature,
}

/// Immutable `(dimension, entity kind) -> field path` table, built once at
/// startup and borrowed by the filter injector. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AttributeMap {
    table: BTreeMap<(FilterDimension, &'static str), &'static str>,
}

impl AttributeMap {
    /// The standard table for the tracking service's entity kinds.
    pub fn standard() -> Self {
        use FilterDimension::*;
        let table = BTreeMap::from([
            ((Owner, "HierarchicalRequirement"), "Owner.UserName"),
            ((Owner, "Task"), "Owner.UserName"),
            ((Owner, "UserIterationCapacity"), "User.UserName"),
            ((Owner, "User"), "UserName"),
            ((Iteration, "HierarchicalRequirement"), "Iteration"),
            ((Iteration, "Task"), "Iteration"),
            ((Iteration, "UserIterationCapacity"), "Iteration"),
            ((Feature, "HierarchicalRequirement"), "Feature.FormattedID"),
            ((Feature, "Task"), "WorkProduct.Feature.FormattedID"),
        ]);
        AttributeMap { table }
    }

    /// The field path to filter `entity_kind` on for `dimension`, or `None`
    /// when the dimension is inapplicable to that kind.
    pub fn resolve(&self, dimension: FilterDimension, entity_kind: &str) -> Option<&'static str> {
        self.table.get(&(dimension, entity_kind)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_paths_terminate_in_user_name() {
        let map = AttributeMap::standard();
        for kind in ["HierarchicalRequirement", "Task", "UserIterationCapacity", "User"] {
            let path = map.resolve(FilterDimension::Owner, kind).unwrap();
            assert!(path.ends_with("UserName"), "{kind}: {path}");
        }
    }

    #[test]
    fn inapplicable_pairs_resolve_to_none() {
        let map = AttributeMap::standard();
        assert_eq!(map.resolve(FilterDimension::Owner, "Iteration"), None);
        assert_eq!(map.resolve(FilterDimension::Iteration, "User"), None);
        assert_eq!(map.resolve(FilterDimension::Feature, "User"), None);
        assert_eq!(map.resolve(FilterDimension::Owner, "NoSuchKind"), None);
    }
}
