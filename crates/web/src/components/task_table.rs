//! Task table rows.

use taskboard_core::{Deadline, Task, TaskPermissions, TaskStatus, User};

/// Shown in place of a missing or unreadable deadline.
pub const NO_DEADLINE: &str = "No deadline";

/// One option in a row's status selector.
#[derive(Debug, Clone)]
pub struct StatusOptionView {
    pub value: &'static str,
    pub selected: bool,
}

/// A task as one table row, with the viewer's affordances resolved.
#[derive(Debug, Clone)]
pub struct TaskRowView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub assignee_name: String,
    pub assignee_email: String,
    pub status: &'static str,
    pub badge_class: &'static str,
    pub status_options: Vec<StatusOptionView>,
    pub deadline: String,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_change_status: bool,
    /// Shows the "You can update status" note.
    pub is_own_task: bool,
    pub edit_href: String,
    pub delete_href: String,
    pub status_action: String,
}

impl TaskRowView {
    #[must_use]
    pub fn new(viewer: &User, task: &Task) -> Self {
        let permissions = TaskPermissions::for_task(viewer, task);
        let (assignee_name, assignee_email) = task.assigned_to.as_ref().map_or_else(
            || ("Unassigned".to_string(), String::new()),
            |user| (user.name.clone(), user.email.clone()),
        );
        let id = urlencoding::encode(task.id.as_str()).into_owned();

        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            assignee_name,
            assignee_email,
            status: task.status.as_str(),
            badge_class: badge_class(task.status),
            status_options: TaskStatus::ALL
                .iter()
                .map(|status| StatusOptionView {
                    value: status.as_str(),
                    selected: *status == task.status,
                })
                .collect(),
            deadline: task
                .deadline
                .as_ref()
                .map_or_else(|| NO_DEADLINE.to_string(), Deadline::display),
            can_edit: permissions.can_edit,
            can_delete: permissions.can_delete,
            can_change_status: permissions.can_change_status,
            is_own_task: permissions.is_own_task,
            edit_href: format!("/tasks/{id}/edit"),
            delete_href: format!("/tasks/{id}/delete"),
            status_action: format!("/tasks/{id}/status"),
            id,
        }
    }
}

/// CSS class of the colored status badge.
#[must_use]
pub const fn badge_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "badge badge-pending",
        TaskStatus::InProgress => "badge badge-in-progress",
        TaskStatus::Completed => "badge badge-completed",
    }
}
