use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::records::{StudySession, Task, TaskStatus};

fn round1(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

/// Sum of session durations in minutes.
pub fn total_study_minutes(sessions: &[StudySession]) -> u32 {
    sessions.iter().map(|s| s.duration_min).sum()
}

/// Minutes studied on `today` only.
pub fn today_study_minutes(sessions: &[StudySession], today: NaiveDate) -> u32 {
    sessions
        .iter()
        .filter(|s| s.date == today)
        .map(|s| s.duration_min)
        .sum()
}

/// Completed tasks as a rounded percentage of all tasks; 0 for an empty list.
pub fn completion_rate(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    (completed as f64 / tasks.len() as f64 * 100.0).round() as u8
}

/// Study hours bucketed by weekday, Monday first.
///
/// All seven buckets are always present, zero-initialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayHours([f64; 7]);

impl WeekdayHours {
    pub fn hours(&self, weekday: Weekday) -> f64 {
        self.0[weekday.num_days_from_monday() as usize]
    }

    /// `(weekday, hours)` pairs in `Mon..Sun` order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, f64)> + '_ {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(|day| (day, self.hours(day)))
    }
}

/// Bucket each session's hours into the weekday of its date.
pub fn hours_by_weekday(sessions: &[StudySession]) -> WeekdayHours {
    let mut buckets = [0.0f64; 7];
    for session in sessions {
        let index = session.date.weekday().num_days_from_monday() as usize;
        buckets[index] += f64::from(session.duration_min) / 60.0;
    }
    WeekdayHours(buckets)
}

/// Aggregated hours for a single subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectHours {
    pub subject: String,
    /// Hours rounded to one decimal place.
    pub hours: f64,
}

/// Group sessions by subject in first-seen order (never sorted).
pub fn hours_by_subject(sessions: &[StudySession]) -> Vec<SubjectHours> {
    let mut groups: Vec<(String, f64)> = Vec::new();
    for session in sessions {
        let hours = f64::from(session.duration_min) / 60.0;
        match groups.iter_mut().find(|(name, _)| *name == session.subject) {
            Some((_, total)) => *total += hours,
            None => groups.push((session.subject.clone(), hours)),
        }
    }
    groups
        .into_iter()
        .map(|(subject, hours)| SubjectHours {
            subject,
            hours: round1(hours),
        })
        .collect()
}

/// Mean hours per session, rounded to one decimal; 0.0 for no sessions.
pub fn average_session_hours(sessions: &[StudySession]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let total_hours = f64::from(total_study_minutes(sessions)) / 60.0;
    round1(total_hours / sessions.len() as f64)
}
