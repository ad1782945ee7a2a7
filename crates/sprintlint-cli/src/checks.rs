//! Backlog process checks.
//!
//! Each check is a pure business rule: it states what to fetch (its own
//! query) and how to format what came back. Scope filters are injected by
//! the fetch wrapper, never here. Checks run strictly one after another;
//! the first failure aborts the run.
//!
//! The registry is a static descriptor table. Adding a check means adding
//! a function and one `CheckDescriptor` line.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use sprintlint_client::{Entity, Tracker, TrackerClient};
use sprintlint_query::QueryExpression;

use crate::report::{format_story, output};

/// A tracker over a boxed transport, so descriptor fn pointers stay
/// object-safe.
pub type DynTracker = Tracker<Box<dyn TrackerClient>>;

pub struct CheckDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub run: fn(&DynTracker) -> Result<Vec<String>>,
}

/// Every registered check, in execution order.
pub const CHECKS: &[CheckDescriptor] = &[
    CheckDescriptor {
        name: "users_with_no_current_stories",
        title: "Users with no current stories",
        run: users_with_no_current_stories,
    },
    CheckDescriptor {
        name: "users_with_too_many_tasks",
        title: "Users with too many tasks",
        run: users_with_too_many_tasks,
    },
    CheckDescriptor {
        name: "current_stories_with_no_points",
        title: "Current stories with no points",
        run: current_stories_with_no_points,
    },
    CheckDescriptor {
        name: "current_stories_with_no_owner",
        title: "Current stories with no owner",
        run: current_stories_with_no_owner,
    },
    CheckDescriptor {
        name: "current_stories_with_no_desc",
        title: "Current stories with no description",
        run: current_stories_with_no_desc,
    },
    CheckDescriptor {
        name: "current_stories_with_no_tasks",
        title: "Current stories with no tasks",
        run: current_stories_with_no_tasks,
    },
    CheckDescriptor {
        name: "current_stories_blocked",
        title: "Current stories that are blocked",
        run: current_stories_blocked,
    },
];

/// Run every registered check whose name contains `pattern` (all of them
/// when no pattern is given), printing each report. Returns how many
/// checks ran.
pub fn run_checks(tracker: &DynTracker, pattern: Option<&str>) -> Result<usize> {
    let mut ran = 0usize;
    for check in CHECKS {
        if let Some(p) = pattern {
            if !check.name.contains(p) {
                continue;
            }
        }
        let details =
            (check.run)(tracker).with_context(|| format!("check `{}` failed", check.name))?;
        output(check.title, &details);
        ran += 1;
    }
    Ok(ran)
}

fn users_with_no_current_stories(tracker: &DynTracker) -> Result<Vec<String>> {
    let stories = tracker.get(
        "HierarchicalRequirement",
        Some(QueryExpression::current_iteration()),
    )?;
    let users = tracker.get("User", None)?;

    let with_stories: BTreeSet<&str> = stories.iter().filter_map(Entity::owner_name).collect();
    Ok(users
        .iter()
        .filter_map(Entity::name)
        .filter(|name| !with_stories.contains(name))
        .map(str::to_string)
        .collect())
}

fn users_with_too_many_tasks(tracker: &DynTracker) -> Result<Vec<String>> {
    let capacities = tracker.get(
        "UserIterationCapacity",
        Some(QueryExpression::current_iteration()),
    )?;
    Ok(capacities
        .iter()
        .filter_map(|uic| {
            let estimate = uic.task_estimates()?;
            let capacity = uic.capacity()?;
            (estimate > capacity).then(|| {
                format!(
                    "{} capacity: {capacity}, task estimate {estimate}",
                    uic.user_name().unwrap_or("(unknown user)")
                )
            })
        })
        .collect())
}

fn current_stories_with_no_points(tracker: &DynTracker) -> Result<Vec<String>> {
    current_stories_where(tracker, "PlanEstimate = null")
}

fn current_stories_with_no_owner(tracker: &DynTracker) -> Result<Vec<String>> {
    current_stories_where(tracker, "Owner = null")
}

fn current_stories_with_no_desc(tracker: &DynTracker) -> Result<Vec<String>> {
    current_stories_where(tracker, "Description = null")
}

fn current_stories_with_no_tasks(tracker: &DynTracker) -> Result<Vec<String>> {
    current_stories_where(tracker, "TaskStatus = NONE")
}

fn current_stories_blocked(tracker: &DynTracker) -> Result<Vec<String>> {
    current_stories_where(tracker, "Blocked = true")
}

/// Stories in the current iteration matching one extra predicate term.
fn current_stories_where(tracker: &DynTracker, term: &str) -> Result<Vec<String>> {
    let mut query = QueryExpression::current_iteration();
    query.and_term(term)?;
    let stories = tracker.get("HierarchicalRequirement", Some(query))?;
    Ok(stories.iter().map(format_story).collect())
}
