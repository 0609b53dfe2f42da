//! Fetch/refresh state for a page-level list.
//!
//! Every dashboard page that shows a list (tasks, users) drives a
//! [`ListState`]:
//!
//! ```text
//! new() ── loading ──┬── finish(Ok)  ──> ready (items replaced, message cleared)
//!                    └── finish(Err) ──> failed (items left as they were)
//! ```
//!
//! A refetch is a fresh request, so it starts from [`ListState::new`].
//!
//! A failed mutation only sets the message via [`ListState::fail_action`];
//! nothing was changed locally, so there is nothing to roll back.

use crate::types::{StatusFilter, Task};

/// Coarse phase of a [`ListState`], for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed,
}

/// A list fetched from the backend plus its loading flag and error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListState<T> {
    /// A freshly mounted list: empty and loading.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// Record the outcome of a fetch.
    ///
    /// On success the items are replaced wholesale and any earlier message is
    /// cleared. On failure the message is stored and the previous items are
    /// kept.
    pub fn finish<E: Into<String>>(&mut self, result: Result<Vec<T>, E>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(message) => self.error = Some(message.into()),
        }
    }

    /// Record a failed mutating action.
    pub fn fail_action(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        if self.loading {
            LoadPhase::Loading
        } else if self.error.is_some() {
            LoadPhase::Failed
        } else {
            LoadPhase::Ready
        }
    }
}

impl ListState<Task> {
    /// Tasks passing `filter`, in fetch order.
    #[must_use]
    pub fn filtered(&self, filter: StatusFilter) -> Vec<&Task> {
        filter_tasks(&self.items, filter)
    }
}

/// Apply a status filter to a fetched task list.
///
/// Pure: the list is never refetched to filter it.
#[must_use]
pub fn filter_tasks(tasks: &[Task], filter: StatusFilter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t.status)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Deadline, TaskId, TaskStatus};

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: TaskId::new(id),
            title: id.to_uppercase(),
            description: String::new(),
            status,
            assigned_to: None,
            deadline: Deadline::parse("2025-05-05").ok(),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("a", TaskStatus::Pending),
            task("b", TaskStatus::InProgress),
            task("c", TaskStatus::Pending),
            task("d", TaskStatus::Completed),
        ]
    }

    #[test]
    fn test_new_list_is_loading_and_empty() {
        let state: ListState<Task> = ListState::new();
        assert_eq!(state.phase(), LoadPhase::Loading);
        assert!(state.items().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_successful_fetch_replaces_items() {
        let mut state = ListState::new();
        state.finish::<String>(Ok(sample()));
        assert_eq!(state.phase(), LoadPhase::Ready);
        assert_eq!(state.items().len(), 4);

        state.finish::<String>(Ok(vec![task("z", TaskStatus::Completed)]));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].id.as_str(), "z");
    }

    #[test]
    fn test_failed_fetch_keeps_previous_items() {
        let mut state = ListState::new();
        state.finish::<String>(Ok(sample()));
        state.finish(Err("Not authorized"));

        assert_eq!(state.phase(), LoadPhase::Failed);
        assert_eq!(state.error(), Some("Not authorized"));
        assert_eq!(state.items().len(), 4);
    }

    #[test]
    fn test_successful_fetch_after_failure_clears_message() {
        let mut state: ListState<Task> = ListState::new();
        state.finish(Err("Backend down"));
        assert_eq!(state.phase(), LoadPhase::Failed);

        state.finish::<String>(Ok(vec![task("a", TaskStatus::Pending)]));
        assert_eq!(state.phase(), LoadPhase::Ready);
        assert!(state.error().is_none());
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn test_failed_first_load_is_empty() {
        let mut state: ListState<Task> = ListState::new();
        state.finish(Err("Token expired".to_string()));
        assert!(state.items().is_empty());
        assert_eq!(state.error(), Some("Token expired"));
    }

    #[test]
    fn test_failed_action_sets_message_only() {
        let mut state = ListState::new();
        state.finish::<String>(Ok(sample()));
        state.fail_action("Task not found");
        assert_eq!(state.error(), Some("Task not found"));
        assert_eq!(state.items(), sample().as_slice());
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let tasks = sample();
        let shown = filter_tasks(&tasks, StatusFilter::All);
        assert_eq!(shown.len(), tasks.len());
    }

    #[test]
    fn test_filter_matches_exactly_the_status() {
        let tasks = sample();
        for status in TaskStatus::ALL {
            let shown = filter_tasks(&tasks, StatusFilter::Only(status));
            let expected: Vec<&Task> = tasks.iter().filter(|t| t.status == status).collect();
            assert_eq!(shown, expected);
        }
    }

    #[test]
    fn test_filtered_preserves_order() {
        let mut state = ListState::new();
        state.finish::<String>(Ok(sample()));
        let ids: Vec<_> = state
            .filtered(StatusFilter::Only(TaskStatus::Pending))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }
}
