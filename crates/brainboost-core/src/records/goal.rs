use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::new_id;

/// A long-term goal. Progress is user-set, never derived from tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    /// Percentage complete, 0-100.
    pub progress: u8,
    pub category: String,
}

impl Goal {
    /// Create a new goal.
    ///
    /// # Errors
    /// Returns a validation error if `title` is empty or `progress` exceeds 100.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        target_date: NaiveDate,
        progress: u8,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if progress > 100 {
            return Err(ValidationError::ProgressOutOfRange(progress));
        }
        Ok(Self {
            id: new_id(),
            title,
            description: description.into(),
            target_date,
            progress,
            category: category.into(),
        })
    }

    /// Set progress, clamping to the valid range.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }
}
