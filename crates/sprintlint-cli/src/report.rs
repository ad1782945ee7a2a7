//! Report formatting.
//!
//! A check that found nothing prints nothing; a check with findings prints
//! a `===Title (count)` header and one line per finding.

use colored::Colorize;

use sprintlint_client::Entity;

/// Print one check's report, or nothing when there are no findings.
pub fn output(title: &str, details: &[String]) {
    for line in render(title, details) {
        println!("{line}");
    }
}

/// The report lines for one check. Split from [`output`] so tests can
/// assert on content without capturing stdout.
pub fn render(title: &str, details: &[String]) -> Vec<String> {
    if details.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(details.len() + 2);
    lines.push(format!("{}", format!("==={title} ({})", details.len()).bold()));
    lines.extend(details.iter().cloned());
    lines.push(String::new());
    lines
}

/// `US1234: This is a story about Jack and Diane`
pub fn format_story(story: &Entity) -> String {
    format!(
        "{}: {}",
        story.formatted_id().unwrap_or("(no id)"),
        story.name().unwrap_or("(unnamed)")
    )
}
