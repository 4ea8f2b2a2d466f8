use priotask_core::TaskListing;
use priotask_core::models::{CoreError, CoreErrorKind, TaskSummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SummaryView<'a> {
    pub name: &'a str,
    pub priority: i64,
    pub due_date: String,
    pub dependencies: &'a [String],
    pub executable: bool,
}

impl<'a> From<&'a TaskSummary> for SummaryView<'a> {
    fn from(summary: &'a TaskSummary) -> Self {
        Self {
            name: &summary.task.name,
            priority: summary.task.priority,
            due_date: summary.task.due_date_text(),
            dependencies: &summary.task.dependencies,
            executable: summary.executable,
        }
    }
}

pub fn status_label(executable: bool) -> &'static str {
    if executable { "executable" } else { "blocked" }
}

pub fn summary_line(summary: &TaskSummary) -> String {
    format!(
        "{} - priority: {}, due: {}, status: {}, dependencies: [{}]",
        summary.task.name,
        summary.task.priority,
        summary.task.due_date_text(),
        status_label(summary.executable),
        summary.task.dependencies.join(", ")
    )
}

pub fn listing_lines(listing: &TaskListing) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(fallback) = listing.fallback() {
        lines.push(format!("note: {fallback}"));
    }
    if listing.is_empty() {
        lines.push("No pending tasks.".to_string());
        return lines;
    }
    lines.push(format!(
        "Pending tasks ({}, by {}):",
        listing.len(),
        listing.sort_key().as_str()
    ));
    lines.extend(listing.iter().map(|summary| summary_line(&summary)));
    lines
}

pub fn listing_json(listing: &TaskListing) -> serde_json::Result<String> {
    let summaries: Vec<TaskSummary> = listing.iter().collect();
    let views: Vec<SummaryView<'_>> = summaries.iter().map(SummaryView::from).collect();
    serde_json::to_string_pretty(&views)
}

pub fn next_line(summary: Option<&TaskSummary>) -> String {
    match summary {
        Some(summary) => format!(
            "Highest priority task: {} (priority: {}, due: {}, status: {})",
            summary.task.name,
            summary.task.priority,
            summary.task.due_date_text(),
            status_label(summary.executable)
        ),
        None => "No pending tasks.".to_string(),
    }
}

pub fn error_line(error: &CoreError) -> String {
    let label = match error.kind {
        CoreErrorKind::InvalidInput => "invalid input",
        CoreErrorKind::NotFound => "not found",
        CoreErrorKind::DependencyUnresolved => "blocked",
        CoreErrorKind::StorageFailure => "storage failure",
    };
    format!("Error ({label}): {}", error.message)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use priotask_core::TaskStore;
    use priotask_core::persistence::MemoryRecordStore;

    use super::{listing_json, listing_lines, next_line};

    fn store() -> TaskStore {
        let mut store = TaskStore::open(Arc::new(MemoryRecordStore::new())).unwrap();
        store.add_task("A", 2, "2025-01-01", Vec::new()).unwrap();
        store
            .add_task("B", 1, "2025-02-01", vec!["A".to_string()])
            .unwrap();
        store
    }

    #[test]
    fn listing_lines_show_status_and_advisory() {
        let lines = listing_lines(&store().list_tasks("bogus"));
        assert_eq!(
            lines,
            vec![
                "note: unknown sort key 'bogus'; listing by priority instead".to_string(),
                "Pending tasks (2, by priority):".to_string(),
                "B - priority: 1, due: 2025-02-01, status: blocked, dependencies: [A]".to_string(),
                "A - priority: 2, due: 2025-01-01, status: executable, dependencies: []"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn listing_json_carries_executability() {
        let json = listing_json(&store().list_tasks("priority")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "B");
        assert_eq!(value[0]["executable"], false);
        assert_eq!(value[1]["due_date"], "2025-01-01");
    }

    #[test]
    fn next_line_handles_empty_store() {
        assert_eq!(next_line(None), "No pending tasks.");
        let store = store();
        let top = store.peek_highest_priority();
        assert!(next_line(top.as_ref()).contains("B (priority: 1"));
    }
}
