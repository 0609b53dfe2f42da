//! Create/edit task form.

use taskboard_core::{Deadline, Task, TaskStatus, User};

/// One `<option>` of the status select.
#[derive(Debug, Clone)]
pub struct StatusOption {
    pub value: &'static str,
    pub selected: bool,
}

/// One `<option>` of the assignee select.
#[derive(Debug, Clone)]
pub struct AssigneeOption {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

/// Values and options for the task form.
///
/// Submitted values are echoed back unchanged when the form is re-rendered
/// after a failure.
#[derive(Debug, Clone)]
pub struct TaskFormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, or whatever the user typed.
    pub deadline: String,
    pub status_options: Vec<StatusOption>,
    pub assignee_options: Vec<AssigneeOption>,
}

impl TaskFormView {
    /// Empty form for a new task.
    #[must_use]
    pub fn create(users: &[User]) -> Self {
        Self {
            heading: "Create Task",
            submit_label: "Create Task",
            action: "/tasks".to_string(),
            title: String::new(),
            description: String::new(),
            deadline: String::new(),
            status_options: status_options(TaskStatus::Pending.as_str()),
            assignee_options: assignee_options(users, ""),
        }
    }

    /// Form pre-filled from an existing task.
    #[must_use]
    pub fn edit(task: &Task, users: &[User]) -> Self {
        let assignee = task
            .assigned_to
            .as_ref()
            .map_or("", |user| user.id.as_str());

        Self {
            heading: "Edit Task",
            submit_label: "Update Task",
            action: format!("/tasks/{}", urlencoding::encode(task.id.as_str())),
            title: task.title.clone(),
            description: task.description.clone(),
            deadline: task.deadline.as_ref().map(Deadline::iso).unwrap_or_default(),
            status_options: status_options(task.status.as_str()),
            assignee_options: assignee_options(users, assignee),
        }
    }

    /// Replace the values with a submission, keeping heading and action.
    #[must_use]
    pub fn with_values(
        mut self,
        title: &str,
        description: &str,
        status: &str,
        assigned_to: &str,
        deadline: &str,
    ) -> Self {
        self.title = title.to_string();
        self.description = description.to_string();
        self.deadline = deadline.to_string();
        for option in &mut self.status_options {
            option.selected = option.value == status;
        }
        for option in &mut self.assignee_options {
            option.selected = option.id == assigned_to;
        }
        self
    }
}

fn status_options(selected: &str) -> Vec<StatusOption> {
    TaskStatus::ALL
        .iter()
        .map(|status| StatusOption {
            value: status.as_str(),
            selected: status.as_str() == selected,
        })
        .collect()
}

fn assignee_options(users: &[User], selected: &str) -> Vec<AssigneeOption> {
    users
        .iter()
        .map(|user| AssigneeOption {
            id: user.id.to_string(),
            label: format!("{} ({})", user.name, user.email),
            selected: user.id.as_str() == selected,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use taskboard_core::{Role, TaskId, UserId, UserRef};

    fn users() -> Vec<User> {
        ["u1", "u2"]
            .iter()
            .map(|id| User {
                id: UserId::new(*id),
                name: format!("User {id}"),
                email: format!("{id}@example.com"),
                role: Role::Member,
            })
            .collect()
    }

    #[test]
    fn test_create_defaults_to_pending() {
        let form = TaskFormView::create(&users());
        assert_eq!(form.action, "/tasks");
        let selected: Vec<_> = form.status_options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "Pending");
        assert!(form.assignee_options.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_edit_prefills_task() {
        let task = Task {
            id: TaskId::new("t9"),
            title: "Ship it".to_string(),
            description: String::new(),
            status: TaskStatus::Completed,
            assigned_to: Some(UserRef {
                id: UserId::new("u2"),
                name: "User u2".to_string(),
                email: "u2@example.com".to_string(),
            }),
            deadline: Deadline::parse("2025-03-01T00:00:00.000Z").ok(),
        };

        let form = TaskFormView::edit(&task, &users());
        assert_eq!(form.action, "/tasks/t9");
        assert_eq!(form.deadline, "2025-03-01");
        let assignee: Vec<_> = form
            .assignee_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(assignee, ["u2"]);
    }

    #[test]
    fn test_with_values_echoes_submission() {
        let form = TaskFormView::create(&users()).with_values("T", "D", "In Progress", "u1", "bad");
        assert_eq!(form.title, "T");
        assert_eq!(form.deadline, "bad");
        assert!(form.status_options.iter().any(|o| o.selected && o.value == "In Progress"));
        assert!(form.assignee_options.iter().any(|o| o.selected && o.id == "u1"));
    }
}
