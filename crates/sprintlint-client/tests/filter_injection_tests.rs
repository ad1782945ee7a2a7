use sprintlint_client::{
    inject_filters, AttributeMap, IterationFilter, ScopeOptions, UnmappedDimension,
};
use sprintlint_query::QueryExpression;

fn owners(names: &[&str]) -> Option<Vec<String>> {
    Some(names.iter().map(|s| s.to_string()).collect())
}

#[test]
fn owner_filter_builds_or_group_per_user() {
    let scope = ScopeOptions {
        filter_owner: owners(&["Ike", "Luke"]),
        ..ScopeOptions::unfiltered()
    };
    let q = inject_filters("Task", None, &scope, &AttributeMap::standard())
        .unwrap()
        .expect("owner dimension contributes");
    assert_eq!(
        q.render(),
        Some("(Owner.UserName = Ike) OR (Owner.UserName = Luke)")
    );
}

#[test]
fn owner_group_is_and_joined_onto_seeded_query() {
    let scope = ScopeOptions {
        filter_owner: owners(&["Ike", "Luke"]),
        ..ScopeOptions::unfiltered()
    };
    let seed = QueryExpression::from_term("Blocked = true").unwrap();
    let q = inject_filters("Task", Some(seed), &scope, &AttributeMap::standard())
        .unwrap()
        .expect("non-empty");
    assert_eq!(
        q.render(),
        Some("(Blocked = true) AND ((Owner.UserName = Ike) OR (Owner.UserName = Luke))")
    );
}

#[test]
fn inapplicable_owner_dimension_is_a_noop_for_iteration_kind() {
    let scope = ScopeOptions {
        filter_owner: owners(&["Ike"]),
        ..ScopeOptions::unfiltered()
    };
    let seed = QueryExpression::from_term("State = Accepted").unwrap();
    let q = inject_filters(
        "Iteration",
        Some(seed.clone()),
        &scope,
        &AttributeMap::standard(),
    )
    .unwrap()
    .expect("caller query survives");
    assert_eq!(q.render(), seed.render());
}

#[test]
fn skip_policy_continues_past_unmapped_dimension() {
    // For User, owner maps but iteration and feature do not: the skip
    // policy drops only the unmapped dimensions and keeps the owner group.
    let scope = ScopeOptions {
        filter_owner: owners(&["Ike"]),
        filter_iteration: Some(IterationFilter::Current),
        filter_feature: Some(vec!["F1".to_string()]),
        on_unmapped: UnmappedDimension::SkipDimension,
    };
    let q = inject_filters("User", None, &scope, &AttributeMap::standard())
        .unwrap()
        .expect("owner dimension contributes");
    assert_eq!(q.render(), Some("UserName = Ike"));
}

#[test]
fn unfiltered_policy_aborts_at_first_unmapped_dimension() {
    let scope = ScopeOptions {
        filter_owner: owners(&["Ike"]),
        filter_iteration: Some(IterationFilter::Current),
        filter_feature: None,
        on_unmapped: UnmappedDimension::ReturnUnfiltered,
    };
    // Owner is unmapped for Iteration: the historical policy returns the
    // caller's query untouched even though iteration filtering could have
    // applied to other kinds.
    let seed = QueryExpression::from_term("State = Accepted").unwrap();
    let q = inject_filters(
        "Iteration",
        Some(seed.clone()),
        &scope,
        &AttributeMap::standard(),
    )
    .unwrap()
    .expect("caller query survives");
    assert_eq!(q.render(), seed.render());
}

#[test]
fn current_iteration_window_uses_inclusive_bounds() {
    let scope = ScopeOptions {
        filter_iteration: Some(IterationFilter::Current),
        ..ScopeOptions::unfiltered()
    };
    let q = inject_filters(
        "HierarchicalRequirement",
        None,
        &scope,
        &AttributeMap::standard(),
    )
    .unwrap()
    .expect("iteration dimension contributes");
    assert_eq!(
        q.render(),
        Some("(Iteration.StartDate <= today) AND (Iteration.EndDate >= today)")
    );
}

#[test]
fn future_iteration_window_is_end_date_only() {
    let scope = ScopeOptions {
        filter_iteration: Some(IterationFilter::Future),
        ..ScopeOptions::unfiltered()
    };
    let q = inject_filters("Task", None, &scope, &AttributeMap::standard())
        .unwrap()
        .expect("iteration dimension contributes");
    assert_eq!(q.render(), Some("Iteration.EndDate >= today"));
}

#[test]
fn feature_filter_builds_or_group() {
    let scope = ScopeOptions {
        filter_feature: Some(vec!["F1".to_string(), "F2".to_string()]),
        ..ScopeOptions::unfiltered()
    };
    let q = inject_filters(
        "HierarchicalRequirement",
        None,
        &scope,
        &AttributeMap::standard(),
    )
    .unwrap()
    .expect("feature dimension contributes");
    assert_eq!(
        q.render(),
        Some("(Feature.FormattedID = F1) OR (Feature.FormattedID = F2)")
    );
}

#[test]
fn all_three_dimensions_merge_in_fixed_order() {
    let scope = ScopeOptions {
        filter_owner: owners(&["Ike"]),
        filter_iteration: Some(IterationFilter::Current),
        filter_feature: Some(vec!["F1".to_string()]),
        on_unmapped: UnmappedDimension::SkipDimension,
    };
    let q = inject_filters(
        "HierarchicalRequirement",
        None,
        &scope,
        &AttributeMap::standard(),
    )
    .unwrap()
    .expect("all dimensions contribute");
    let rendered = q.render().unwrap();
    let owner_at = rendered.find("Owner.UserName").unwrap();
    let iteration_at = rendered.find("Iteration.StartDate").unwrap();
    let feature_at = rendered.find("Feature.FormattedID").unwrap();
    assert!(owner_at < iteration_at && iteration_at < feature_at);
    let open = rendered.chars().filter(|c| *c == '(').count();
    let close = rendered.chars().filter(|c| *c == ')').count();
    assert_eq!(open, close);
}

#[test]
fn empty_owner_set_contributes_nothing() {
    let scope = ScopeOptions {
        filter_owner: Some(vec![]),
        ..ScopeOptions::unfiltered()
    };
    let q = inject_filters("Task", None, &scope, &AttributeMap::standard()).unwrap();
    assert!(q.is_none());
}

#[test]
fn no_scope_and_no_caller_query_yields_none() {
    let q = inject_filters(
        "Task",
        None,
        &ScopeOptions::unfiltered(),
        &AttributeMap::standard(),
    )
    .unwrap();
    assert!(q.is_none());
}
