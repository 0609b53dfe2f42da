//! Task status and the dashboard's status filter.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a task.
///
/// The backend spells these with spaces and capitals (`"In Progress"`).
/// No ordering between states is enforced: any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the wire/display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            _ => Err(format!("invalid task status: {s}")),
        }
    }
}

/// Status filter applied to an already-fetched task list.
///
/// Parsed from the `status` query parameter. Anything that is not a known
/// status (including a missing parameter) means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Filter options in the order the filter bar shows them.
    pub const OPTIONS: [Self; 4] = [
        Self::All,
        Self::Only(TaskStatus::Pending),
        Self::Only(TaskStatus::InProgress),
        Self::Only(TaskStatus::Completed),
    ];

    /// Parse a query value, falling back to [`StatusFilter::All`].
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<TaskStatus>().ok())
            .map_or(Self::All, Self::Only)
    }

    /// Value used in the `status` query parameter.
    #[must_use]
    pub const fn as_query(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    /// Label shown on the filter button.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Tasks",
            Self::Only(status) => status.as_str(),
        }
    }

    /// Whether a task with `status` passes this filter.
    #[must_use]
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        let status: TaskStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(status, TaskStatus::Completed);
        assert!(serde_json::from_str::<TaskStatus>("\"in_progress\"").is_err());
    }

    #[test]
    fn test_status_parse_matches_display() {
        for status in TaskStatus::ALL {
            assert_eq!(status.to_string().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_filter_from_query() {
        assert_eq!(StatusFilter::from_query(None), StatusFilter::All);
        assert_eq!(StatusFilter::from_query(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::from_query(Some("bogus")), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_query(Some("In Progress")),
            StatusFilter::Only(TaskStatus::InProgress)
        );
    }

    #[test]
    fn test_filter_matches() {
        for status in TaskStatus::ALL {
            assert!(StatusFilter::All.matches(status));
        }
        let only_pending = StatusFilter::Only(TaskStatus::Pending);
        assert!(only_pending.matches(TaskStatus::Pending));
        assert!(!only_pending.matches(TaskStatus::Completed));
    }

    #[test]
    fn test_filter_labels() {
        let labels: Vec<_> = StatusFilter::OPTIONS.iter().map(StatusFilter::label).collect();
        assert_eq!(labels, ["All Tasks", "Pending", "In Progress", "Completed"]);
    }
}
