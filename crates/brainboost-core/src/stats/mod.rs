//! Derived analytics over task and session records.
//!
//! Every function here is a pure, deterministic fold over the lists it is
//! handed: no global state, no caching, no mutation of the input. The
//! controller recomputes on every dashboard refresh.

mod insights;
mod streak;
mod summary;

pub use insights::{insights, Insight};
pub use streak::consecutive_study_days;
pub use summary::{
    average_session_hours, completion_rate, hours_by_subject, hours_by_weekday,
    today_study_minutes, total_study_minutes, SubjectHours, WeekdayHours,
};
