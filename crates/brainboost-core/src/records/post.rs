use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::new_id;

/// A community forum post with simple like/reply counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub subject: String,
    pub likes: u32,
    pub replies: u32,
    pub created_at: NaiveDate,
}

impl ForumPost {
    /// Create a post with zeroed counters.
    ///
    /// # Errors
    /// Returns a validation error if `author`, `title`, or `content` is empty.
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        subject: impl Into<String>,
        created_at: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let author = author.into();
        let title = title.into();
        let content = content.into();
        if author.trim().is_empty() {
            return Err(ValidationError::EmptyField("author"));
        }
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyField("content"));
        }
        Ok(Self {
            id: new_id(),
            author,
            title,
            content,
            subject: subject.into(),
            likes: 0,
            replies: 0,
            created_at,
        })
    }

    pub fn like(&mut self) {
        self.likes += 1;
    }
}
