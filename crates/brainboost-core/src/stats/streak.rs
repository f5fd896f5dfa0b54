use chrono::NaiveDate;

use crate::records::StudySession;

/// Consecutive-study-day streak over session dates.
///
/// This keeps the dashboard's historical behavior: session dates are
/// sorted ascending and walked from the most recent entry backwards,
/// counting while an entry equals `today` or equals the entry after it.
/// Adjacent *equal* dates extend the streak; a one-day calendar gap does
/// not. In practice the streak therefore counts duplicate dates anchored
/// on today, not calendar-day adjacency.
pub fn consecutive_study_days(sessions: &[StudySession], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = sessions.iter().map(|s| s.date).collect();
    dates.sort_unstable();

    let mut streak = 0;
    for i in (0..dates.len()).rev() {
        if dates[i] == today || (i + 1 < dates.len() && dates[i] == dates[i + 1]) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::SessionKind;

    fn session(date: &str) -> StudySession {
        StudySession::new("Math", 30, date.parse().unwrap(), SessionKind::Free).unwrap()
    }

    fn today() -> NaiveDate {
        "2025-02-10".parse().unwrap()
    }

    #[test]
    fn no_sessions_means_no_streak() {
        assert_eq!(consecutive_study_days(&[], today()), 0);
    }

    #[test]
    fn sessions_today_all_count() {
        let sessions = vec![session("2025-02-10"), session("2025-02-10"), session("2025-02-10")];
        assert_eq!(consecutive_study_days(&sessions, today()), 3);
    }

    #[test]
    fn duplicate_past_dates_extend_a_today_anchored_streak() {
        let sessions = vec![
            session("2025-02-09"),
            session("2025-02-09"),
            session("2025-02-10"),
        ];
        // Only the today entry counts: 02-09 != today and differs from 02-10.
        assert_eq!(consecutive_study_days(&sessions, today()), 1);
    }

    #[test]
    fn adjacent_calendar_days_do_not_chain() {
        // Distinct consecutive dates, none today: the walk stops immediately.
        let sessions = vec![session("2025-02-07"), session("2025-02-08"), session("2025-02-09")];
        assert_eq!(consecutive_study_days(&sessions, today()), 0);
    }

    #[test]
    fn duplicate_dates_chain_through_the_most_recent_run() {
        let sessions = vec![
            session("2025-02-01"),
            session("2025-02-10"),
            session("2025-02-10"),
            session("2025-02-10"),
        ];
        assert_eq!(consecutive_study_days(&sessions, today()), 3);
    }

    #[test]
    fn most_recent_date_not_today_yields_zero() {
        let sessions = vec![session("2025-02-08"), session("2025-02-08")];
        assert_eq!(consecutive_study_days(&sessions, today()), 0);
    }
}
