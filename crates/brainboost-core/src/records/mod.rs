//! Record types shared across the timer, analytics, and storage layers.
//!
//! Every record (de)serializes with the same field names the persisted
//! JSON slots use, so existing data loads unchanged.

mod goal;
mod material;
mod post;
mod session;
mod task;

pub use goal::Goal;
pub use material::{Material, MaterialKind};
pub use post::ForumPost;
pub use session::{SessionKind, StudySession};
pub use task::{Priority, Task, TaskStatus};

use serde::{Deserialize, Serialize};

/// Free-text user profile captured at onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub course: String,
    pub goals: String,
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
