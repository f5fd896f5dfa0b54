use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::new_id;

/// Lifecycle state of a task. User toggling cycles through the three
/// states in order; there are no other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Next status in the pending -> in-progress -> completed -> pending cycle.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A user-created study task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    /// Create a new pending task.
    ///
    /// # Errors
    /// Returns a validation error if `title` or `subject` is empty.
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        priority: Priority,
        due_date: NaiveDate,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let subject = subject.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if subject.trim().is_empty() {
            return Err(ValidationError::EmptyField("subject"));
        }
        Ok(Self {
            id: new_id(),
            title,
            subject,
            status: TaskStatus::Pending,
            priority,
            due_date,
            description,
        })
    }

    /// Advance the status one step along the toggle cycle.
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn status_cycles_through_all_three_states() {
        let mut task = Task::new("Read ch. 4", "History", Priority::Medium, date("2025-03-01"), None).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        task.toggle_status();
        assert_eq!(task.status, TaskStatus::InProgress);
        task.toggle_status();
        assert_eq!(task.status, TaskStatus::Completed);
        task.toggle_status();
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn empty_title_is_rejected() {
        let result = Task::new("  ", "Math", Priority::Low, date("2025-03-01"), None);
        assert!(result.is_err());
    }

    #[test]
    fn wire_format_matches_stored_json() {
        let mut task =
            Task::new("Essay draft", "Literature", Priority::High, date("2025-04-12"), None).unwrap();
        task.toggle_status();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["dueDate"], "2025-04-12");
    }
}
