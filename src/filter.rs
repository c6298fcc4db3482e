//! The filter engine.
//!
//! Three independent predicates over a task list: a case-insensitive
//! search term OR'd across the searchable fields, an exact status match,
//! and an exact priority match. A task passes only when all three hold.

use crate::task::{Priority, Status, Task};

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Substring matched against hydrant id, location, kind label, and
    /// title (when present). Empty or absent matches everything.
    pub search: Option<String>,
    /// Exact status; absent means "all".
    pub status: Option<Status>,
    /// Exact priority; absent means "all".
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.status.map_or(true, |status| task.status == status)
            && self
                .priority
                .map_or(true, |priority| task.priority == priority)
    }

    /// Narrow a list, preserving input order.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .collect()
    }

    fn matches_search(&self, task: &Task) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let mut fields = vec![
            task.hydrant_id.to_lowercase(),
            task.location.to_lowercase(),
            task.kind.label().to_string(),
        ];
        if let Some(title) = &task.title {
            fields.push(title.to_lowercase());
        }

        fields.iter().any(|field| field.contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::seed_tasks;

    fn filter(search: Option<&str>, status: Option<Status>, priority: Option<Priority>) -> TaskFilter {
        TaskFilter {
            search: search.map(str::to_string),
            status,
            priority,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let tasks = seed_tasks().expect("seed");
        let out = TaskFilter::default().apply(tasks.clone());
        assert_eq!(out, tasks);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let tasks = seed_tasks().expect("seed");

        // Hydrant id, any case.
        let by_hydrant = filter(Some("h-tng-002"), None, None).apply(tasks.clone());
        assert!(by_hydrant.iter().all(|t| t.hydrant_id == "H-TNG-002"));
        assert_eq!(by_hydrant.len(), 2);

        // Location substring.
        let by_location = filter(Some("tétouan"), None, None).apply(tasks.clone());
        assert!(by_location.iter().all(|t| t.location.contains("Tétouan")));

        // Kind label.
        let by_kind = filter(Some("REPAIR"), None, None).apply(tasks.clone());
        assert!(by_kind.iter().any(|t| t.id == "TK002"));

        // Title, only present on maintenance tickets.
        let by_title = filter(Some("valve principale"), None, None).apply(tasks);
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "1");
    }

    #[test]
    fn predicates_combine_with_and() {
        let tasks = seed_tasks().expect("seed");

        let narrowed = filter(Some("tanger"), Some(Status::Pending), Some(Priority::High))
            .apply(tasks.clone());
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].id, "3");

        // Same search, different status: different survivor set.
        let pending_only = filter(None, Some(Status::Pending), None).apply(tasks);
        assert!(pending_only.iter().all(|t| t.status == Status::Pending));
        assert_eq!(pending_only.len(), 5);
    }

    #[test]
    fn status_filter_includes_the_reference_repair() {
        let tasks = seed_tasks().expect("seed");

        let in_progress = filter(None, Some(Status::InProgress), None).apply(tasks.clone());
        assert!(in_progress.iter().any(|t| t.id == "TK002"));

        let low = filter(None, None, Some(Priority::Low)).apply(tasks);
        assert!(low.iter().all(|t| t.id != "TK002"));
    }

    #[test]
    fn blank_search_term_matches_everything() {
        let tasks = seed_tasks().expect("seed");
        let out = filter(Some("   "), None, None).apply(tasks.clone());
        assert_eq!(out.len(), tasks.len());
    }

    #[test]
    fn order_is_preserved_from_input() {
        let tasks = seed_tasks().expect("seed");
        let narrowed = filter(Some("tanger"), None, None).apply(tasks.clone());
        let expected: Vec<String> = tasks
            .iter()
            .filter(|t| t.location.to_lowercase().contains("tanger"))
            .map(|t| t.id.clone())
            .collect();
        let got: Vec<String> = narrowed.iter().map(|t| t.id.clone()).collect();
        assert_eq!(got, expected);
    }
}
