use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Emitted by the timer engine on work-phase completion.
    Pomodoro,
    /// Manually logged study time.
    Free,
}

/// One completed period of study. Immutable once created; the session
/// list is append-only, newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub subject: String,
    /// Duration in minutes, always > 0.
    #[serde(rename = "duration")]
    pub duration_min: u32,
    /// Calendar date at day granularity; no time-of-day component.
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: SessionKind,
}

impl StudySession {
    /// Create a session record.
    ///
    /// # Errors
    /// Returns a validation error for a zero duration or empty subject.
    pub fn new(
        subject: impl Into<String>,
        duration_min: u32,
        date: NaiveDate,
        kind: SessionKind,
    ) -> Result<Self, ValidationError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::EmptyField("subject"));
        }
        if duration_min == 0 {
            return Err(ValidationError::NonPositiveDuration(duration_min));
        }
        Ok(Self {
            id: new_id(),
            subject,
            duration_min,
            date,
            kind,
        })
    }
}
