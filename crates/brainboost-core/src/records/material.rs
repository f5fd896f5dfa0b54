use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Note,
    Pdf,
    Link,
}

/// A study resource: a free-text note or a reference to an external file/link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: NaiveDate,
}

impl Material {
    /// Create a material entry.
    ///
    /// # Errors
    /// Returns a validation error if `title` or `subject` is empty.
    pub fn new(
        title: impl Into<String>,
        kind: MaterialKind,
        subject: impl Into<String>,
        content: Option<String>,
        url: Option<String>,
        created_at: NaiveDate,
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
            kind,
            subject,
            content,
            url,
            created_at,
        })
    }
}
