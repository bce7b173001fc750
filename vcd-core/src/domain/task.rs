//! Task domain types
//!
//! Long-running server operations answer with a task record that callers
//! poll until it reaches a terminal status.

use serde::{Deserialize, Serialize};

use crate::dto::error::ApiErrorBody;

/// A server-side task tracking a long-running operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Absolute URL for polling this task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    pub status: TaskStatus,

    /// Completion percentage, when the server reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Populated when the task ends in `Error` or `Aborted`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

/// Status of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Queued,
    PreRunning,
    Running,
    Success,
    Error,
    Aborted,
}

impl TaskStatus {
    /// Whether the task can no longer change status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Success | TaskStatus::Error | TaskStatus::Aborted
        )
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Queued => write!(f, "queued"),
            TaskStatus::PreRunning => write!(f, "preRunning"),
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Success => write!(f, "success"),
            TaskStatus::Error => write!(f, "error"),
            TaskStatus::Aborted => write!(f, "aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(TaskStatus::Success.is_terminal());
        assert!(TaskStatus::Error.is_terminal());
        assert!(TaskStatus::Aborted.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
        assert!(!TaskStatus::Queued.is_terminal());
    }

    #[test]
    fn status_uses_camel_case_on_the_wire() {
        let status: TaskStatus = serde_json::from_str("\"preRunning\"").unwrap();
        assert_eq!(status, TaskStatus::PreRunning);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"preRunning\"");
    }
}
