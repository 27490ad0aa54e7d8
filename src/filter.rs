// Display filters and the sorted projection

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Task;

/// View mode controlling which tasks are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Whether a task belongs to this view
    pub fn keeps(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    /// Placeholder shown when the view is empty
    pub fn empty_message(self) -> &'static str {
        match self {
            Filter::All => "No tasks yet. Add one with `taskpad add`.",
            Filter::Active => "No active tasks",
            Filter::Completed => "No completed tasks",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Active => write!(f, "active"),
            Filter::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid filter: '{0}' (expected all, active or completed)")]
pub struct InvalidFilter(pub String);

impl std::str::FromStr for Filter {
    type Err = InvalidFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            _ => Err(InvalidFilter(s.to_string())),
        }
    }
}

/// Derive the displayed sequence from the canonical list.
///
/// Filters per the view mode, then stable-sorts: priority descending,
/// ties broken by creation time ascending. The result is recomputed on
/// every render and never written back to the store.
pub fn project(tasks: &[Task], filter: Filter) -> Vec<Task> {
    let mut view: Vec<Task> = tasks.iter().filter(|t| filter.keeps(t)).cloned().collect();
    view.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.created_key().cmp(&b.created_key()))
    });
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn task(id: i64, priority: Priority, created_at: &str, completed: bool) -> Task {
        Task {
            id,
            text: format!("task {}", id),
            time: String::new(),
            date: String::new(),
            priority,
            completed,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("Active".parse::<Filter>().unwrap(), Filter::Active);
        assert_eq!("completed".parse::<Filter>().unwrap(), Filter::Completed);
        assert!("finished".parse::<Filter>().is_err());
    }

    #[test]
    fn test_project_sorts_by_priority_descending() {
        // Added low, high, medium; displayed high, medium, low.
        let tasks = vec![
            task(1, Priority::Low, "2024-01-01T10:00:00.000Z", false),
            task(2, Priority::High, "2024-01-01T10:01:00.000Z", false),
            task(3, Priority::Medium, "2024-01-01T10:02:00.000Z", false),
        ];

        let view = project(&tasks, Filter::All);
        let ids: Vec<i64> = view.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_project_breaks_priority_ties_by_creation_time() {
        let tasks = vec![
            task(2, Priority::High, "2024-01-02T00:00:00.000Z", false),
            task(1, Priority::High, "2024-01-01T00:00:00.000Z", false),
        ];

        let view = project(&tasks, Filter::All);
        assert_eq!(view[0].id, 1);
        assert_eq!(view[1].id, 2);
    }

    #[test]
    fn test_project_filters_partition_the_list() {
        let tasks = vec![
            task(1, Priority::Low, "2024-01-01T00:00:00.000Z", false),
            task(2, Priority::High, "2024-01-01T00:01:00.000Z", true),
            task(3, Priority::Medium, "2024-01-01T00:02:00.000Z", true),
            task(4, Priority::High, "2024-01-01T00:03:00.000Z", false),
        ];

        let active = project(&tasks, Filter::Active);
        let completed = project(&tasks, Filter::Completed);
        let all = project(&tasks, Filter::All);

        assert!(active.iter().all(|t| !t.completed));
        assert!(completed.iter().all(|t| t.completed));
        assert_eq!(active.len() + completed.len(), all.len());

        let mut union: Vec<i64> = active.iter().chain(completed.iter()).map(|t| t.id).collect();
        union.sort_unstable();
        let mut everything: Vec<i64> = all.iter().map(|t| t.id).collect();
        everything.sort_unstable();
        assert_eq!(union, everything);
    }

    #[test]
    fn test_project_does_not_reorder_source() {
        let tasks = vec![
            task(1, Priority::Low, "2024-01-01T00:00:00.000Z", false),
            task(2, Priority::High, "2024-01-01T00:01:00.000Z", false),
        ];

        let _ = project(&tasks, Filter::All);
        // Canonical order is untouched; projection is a derived copy.
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[1].id, 2);
    }

    #[test]
    fn test_empty_messages_are_distinct() {
        let all = Filter::All.empty_message();
        let active = Filter::Active.empty_message();
        let completed = Filter::Completed.empty_message();
        assert_ne!(all, active);
        assert_ne!(active, completed);
        assert_ne!(all, completed);
    }
}
