//! Tasks as served by the backend.

use serde::{Deserialize, Serialize};

use super::{Deadline, TaskId, TaskStatus, UserId, deadline};

/// Summary of the user a task is assigned to (populated by the backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    /// `None` when the assignee has been removed on the backend.
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
    /// `None` when the backend sent no readable deadline.
    #[serde(default, deserialize_with = "deadline::deserialize_lenient")]
    pub deadline: Option<Deadline>,
}

impl Task {
    /// Whether the task is assigned to `user_id`.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &UserId) -> bool {
        self.assigned_to.as_ref().is_some_and(|a| &a.id == user_id)
    }
}

/// Body for creating or replacing a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: UserId,
    pub deadline: Deadline,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_deserializes_backend_document() {
        let task: Task = serde_json::from_value(json!({
            "_id": "t1",
            "title": "Write report",
            "description": "Quarterly numbers",
            "status": "In Progress",
            "assignedTo": { "_id": "u1", "name": "Ada", "email": "ada@example.com" },
            "deadline": "2025-01-05T00:00:00.000Z",
            "createdAt": "2024-12-01T10:00:00.000Z",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(task.id.as_str(), "t1");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.is_assigned_to(&UserId::new("u1")));
        assert!(!task.is_assigned_to(&UserId::new("u2")));
        assert_eq!(task.deadline.map(|d| d.iso()).as_deref(), Some("2025-01-05"));
    }

    #[test]
    fn test_task_without_assignee() {
        let task: Task = serde_json::from_value(json!({
            "id": "t2",
            "title": "Orphan",
            "status": "Pending",
            "assignedTo": null,
            "deadline": "2025-02-01"
        }))
        .unwrap();

        assert!(task.assigned_to.is_none());
        assert!(task.description.is_empty());
        assert!(!task.is_assigned_to(&UserId::new("u1")));
    }

    #[test]
    fn test_unreadable_deadline_does_not_fail_the_list() {
        let tasks: Vec<Task> = serde_json::from_value(json!([
            { "_id": "t1", "title": "Dated", "status": "Pending", "deadline": "2025-02-01" },
            { "_id": "t2", "title": "Undated", "status": "Pending" },
            { "_id": "t3", "title": "Null", "status": "Pending", "deadline": null },
            { "_id": "t4", "title": "Garbage", "status": "Pending", "deadline": "someday" },
            { "_id": "t5", "title": "Number", "status": "Pending", "deadline": 1_735_689_600 }
        ]))
        .unwrap();

        assert_eq!(tasks.len(), 5);
        assert!(tasks[0].deadline.is_some());
        assert!(tasks[1..].iter().all(|t| t.deadline.is_none()));
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = TaskDraft {
            title: "Ship it".to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
            assigned_to: UserId::new("u9"),
            deadline: Deadline::parse("2025-06-30").unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "title": "Ship it",
                "description": "",
                "status": "Pending",
                "assignedTo": "u9",
                "deadline": "2025-06-30"
            })
        );
    }
}
