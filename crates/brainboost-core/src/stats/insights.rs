use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::{StudySession, Task};

use super::{completion_rate, consecutive_study_days};

/// Advisory shown on the analytics view. Several can be active at once;
/// the set is recomputed on every call with no stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Task completion rate is at least 80 percent.
    HighCompletionRate { rate: u8 },
    /// Study streak of at least 3 days.
    StudyStreak { days: u32 },
    /// At least 5 pomodoros completed today.
    DeepFocus { pomodoros: u32 },
    /// No sessions recorded yet.
    GettingStarted,
}

impl Insight {
    pub fn message(&self) -> String {
        match self {
            Insight::HighCompletionRate { .. } => {
                "Excellent task completion rate. Keep it up!".to_string()
            }
            Insight::StudyStreak { days } => {
                format!("You have kept a {days}-day study streak. Keep the rhythm!")
            }
            Insight::DeepFocus { pomodoros } => {
                format!("{pomodoros} pomodoros completed today. Your focus is excellent!")
            }
            Insight::GettingStarted => {
                "Start your first study session and begin tracking your progress!".to_string()
            }
        }
    }
}

/// Evaluate all insight triggers over the current aggregates.
pub fn insights(
    tasks: &[Task],
    sessions: &[StudySession],
    pomodoros_today: u32,
    today: NaiveDate,
) -> Vec<Insight> {
    let mut active = Vec::new();

    let rate = completion_rate(tasks);
    if rate >= 80 {
        active.push(Insight::HighCompletionRate { rate });
    }

    let days = consecutive_study_days(sessions, today);
    if days >= 3 {
        active.push(Insight::StudyStreak { days });
    }

    if pomodoros_today >= 5 {
        active.push(Insight::DeepFocus {
            pomodoros: pomodoros_today,
        });
    }

    if sessions.is_empty() {
        active.push(Insight::GettingStarted);
    }

    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Priority, SessionKind, TaskStatus};

    fn today() -> NaiveDate {
        "2025-02-10".parse().unwrap()
    }

    fn completed_task() -> Task {
        let mut t = Task::new("t", "s", Priority::Low, today(), None).unwrap();
        t.status = TaskStatus::Completed;
        t
    }

    fn today_session() -> StudySession {
        StudySession::new("Math", 25, today(), SessionKind::Pomodoro).unwrap()
    }

    #[test]
    fn empty_state_suggests_getting_started_only() {
        let active = insights(&[], &[], 0, today());
        assert_eq!(active, vec![Insight::GettingStarted]);
    }

    #[test]
    fn multiple_insights_can_be_active() {
        let tasks = vec![completed_task(), completed_task()];
        let sessions = vec![today_session(), today_session(), today_session()];
        let active = insights(&tasks, &sessions, 6, today());
        assert!(active.contains(&Insight::HighCompletionRate { rate: 100 }));
        assert!(active.contains(&Insight::StudyStreak { days: 3 }));
        assert!(active.contains(&Insight::DeepFocus { pomodoros: 6 }));
        assert!(!active.contains(&Insight::GettingStarted));
    }

    #[test]
    fn thresholds_are_inclusive() {
        let tasks: Vec<Task> = (0..5)
            .map(|i| {
                let mut t = completed_task();
                if i == 4 {
                    t.status = TaskStatus::Pending;
                }
                t
            })
            .collect();
        // 4/5 = 80 exactly
        let active = insights(&tasks, &[today_session()], 5, today());
        assert!(active.contains(&Insight::HighCompletionRate { rate: 80 }));
        assert!(active.contains(&Insight::DeepFocus { pomodoros: 5 }));
    }

    #[test]
    fn messages_are_fixed_per_trigger() {
        assert!(Insight::StudyStreak { days: 4 }.message().contains("4-day"));
        assert!(Insight::GettingStarted.message().contains("first study session"));
    }
}
