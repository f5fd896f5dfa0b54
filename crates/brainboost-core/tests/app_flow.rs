//! End-to-end flows through the public controller API.

use brainboost_core::error::StoreError;
use brainboost_core::records::{MaterialKind, Priority, SessionKind, TaskStatus, UserProfile};
use brainboost_core::storage::{JsonFileStore, KeyValueStore, MemoryStore, Slot};
use brainboost_core::timer::{Phase, BREAK_SECS, WORK_SECS};
use brainboost_core::{Event, StudyApp};

use chrono::Local;

fn due() -> chrono::NaiveDate {
    "2025-06-01".parse().unwrap()
}

#[test]
fn onboarding_then_task_lifecycle() {
    let app = StudyApp::with_store(MemoryStore::new());
    assert!(app.profile().is_none());

    app.set_profile(UserProfile {
        name: "Ana".into(),
        course: "Physics".into(),
        goals: "Pass finals".into(),
    });
    assert_eq!(app.profile().unwrap().name, "Ana");

    let first = app
        .add_task("Read chapter 4", "Physics", Priority::High, due(), None)
        .unwrap();
    let second = app
        .add_task("Problem set", "Math", Priority::Medium, due(), None)
        .unwrap();

    // Newest first.
    let tasks = app.tasks();
    assert_eq!(tasks[0].id, second.id);
    assert_eq!(tasks[1].id, first.id);

    assert!(app.toggle_task(&first.id));
    assert_eq!(app.tasks()[1].status, TaskStatus::InProgress);
    assert!(app.toggle_task(&first.id));
    assert_eq!(app.tasks()[1].status, TaskStatus::Completed);

    assert!(!app.toggle_task("no-such-id"));
    assert!(app.delete_task(&second.id));
    assert!(!app.delete_task(&second.id));
    assert_eq!(app.tasks().len(), 1);
}

#[test]
fn empty_title_is_rejected() {
    let app = StudyApp::with_store(MemoryStore::new());
    assert!(app
        .add_task("   ", "Physics", Priority::Low, due(), None)
        .is_err());
    assert!(app.tasks().is_empty());
}

#[test]
fn full_pomodoro_cycle_through_the_controller() {
    let mut app = StudyApp::with_store(MemoryStore::new());
    app.start_timer();
    for _ in 0..WORK_SECS {
        app.tick_timer();
    }

    // One focus session, paused at the start of the break.
    let sessions = app.sessions();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].subject, "Focus Session");
    assert_eq!(sessions[0].duration_min, 25);
    assert_eq!(sessions[0].kind, SessionKind::Pomodoro);

    let snap = app.timer_snapshot();
    assert_eq!(snap.phase, Phase::Break);
    assert_eq!(snap.remaining_secs, BREAK_SECS);
    assert!(!snap.running);
    assert_eq!(snap.completed_work_cycles, 1);

    // The break rolls straight back into work while running.
    app.start_timer();
    for _ in 0..BREAK_SECS {
        app.tick_timer();
    }
    let snap = app.timer_snapshot();
    assert_eq!(snap.phase, Phase::Work);
    assert_eq!(snap.remaining_secs, WORK_SECS);
    assert!(snap.running);
    assert_eq!(app.sessions().len(), 1);

    app.reset_timer();
    let snap = app.timer_snapshot();
    assert_eq!(snap.remaining_secs, WORK_SECS);
    assert!(!snap.running);
    assert_eq!(snap.completed_work_cycles, 1);

    let events = app.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::WorkCompleted { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::BreakCompleted { .. })));
    assert!(matches!(events.last(), Some(Event::TimerReset { .. })));
}

#[test]
fn state_survives_a_restart() {
    let tmp = tempfile::tempdir().unwrap();

    {
        let mut app = StudyApp::with_store(JsonFileStore::at(tmp.path()));
        app.set_profile(UserProfile {
            name: "Ben".into(),
            course: "History".into(),
            goals: String::new(),
        });
        app.add_task("Essay outline", "History", Priority::High, due(), None)
            .unwrap();
        app.log_session("History", 40, "2025-05-20".parse().unwrap())
            .unwrap();
        app.add_goal("Thesis draft", "10 pages", due(), 20, "academic")
            .unwrap();
        app.add_material(
            "Lecture notes",
            MaterialKind::Note,
            "History",
            Some("WWI causes".into()),
            None,
        )
        .unwrap();
        app.add_post("Study group?", "Anyone up for Thursday?", "History")
            .unwrap();

        app.start_timer();
        for _ in 0..WORK_SECS {
            app.tick_timer();
        }
    }

    let app = StudyApp::with_store(JsonFileStore::at(tmp.path()));
    assert_eq!(app.profile().unwrap().name, "Ben");
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(app.sessions().len(), 2);
    assert_eq!(app.goals().len(), 1);
    assert_eq!(app.materials().len(), 1);
    assert_eq!(app.posts().len(), 1);
    assert_eq!(app.posts()[0].author, "Ben");
    assert_eq!(app.timer_snapshot().completed_work_cycles, 1);
    // The countdown itself starts fresh.
    assert_eq!(app.timer_snapshot().remaining_secs, WORK_SECS);
}

#[test]
fn posting_without_a_profile_is_rejected() {
    let app = StudyApp::with_store(MemoryStore::new());
    assert!(app.add_post("Hello", "First post", "General").is_err());
    assert!(app.posts().is_empty());
}

#[test]
fn likes_and_goal_progress() {
    let app = StudyApp::with_store(MemoryStore::new());
    app.set_profile(UserProfile {
        name: "Cam".into(),
        course: "CS".into(),
        goals: String::new(),
    });

    let post = app.add_post("Tips", "Spaced repetition works", "CS").unwrap();
    assert!(app.like_post(&post.id));
    assert!(app.like_post(&post.id));
    assert_eq!(app.posts()[0].likes, 2);
    assert!(!app.like_post("missing"));

    let goal = app.add_goal("Ship project", "", due(), 0, "academic").unwrap();
    assert!(app.set_goal_progress(&goal.id, 150));
    assert_eq!(app.goals()[0].progress, 100);
    assert!(app.delete_goal(&goal.id));
    assert!(app.goals().is_empty());
}

#[test]
fn dashboard_reflects_sessions_and_tasks() {
    let app = StudyApp::with_store(MemoryStore::new());
    let today = Local::now().date_naive();

    app.log_session("Math", 60, today).unwrap();
    app.log_session("Math", 30, today - chrono::Days::new(1)).unwrap();
    let task = app
        .add_task("Review", "Math", Priority::Low, due(), None)
        .unwrap();
    app.toggle_task(&task.id);
    app.toggle_task(&task.id);

    let stats = app.dashboard_on(today);
    assert_eq!(stats.total_study_minutes, 90);
    assert_eq!(stats.today_study_minutes, 60);
    assert_eq!(stats.completion_rate, 100);
    // The streak walk only extends past today through duplicate dates.
    assert_eq!(stats.consecutive_study_days, 1);
    assert_eq!(stats.subject_hours.len(), 1);
    assert_eq!(stats.subject_hours[0].subject, "Math");
    assert!((stats.average_session_hours - 0.8).abs() < 1e-9);
    assert!(!stats.insights.is_empty());
}

/// A store whose writes always fail. Reads succeed so startup works.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn load(&self, _slot: Slot) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn save(&self, slot: Slot, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::WriteFailed {
            slot: slot.key().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

#[test]
fn failed_saves_keep_in_memory_state() {
    let app = StudyApp::with_store(BrokenStore);
    let task = app
        .add_task("Still here", "Math", Priority::Low, due(), None)
        .unwrap();
    assert_eq!(app.tasks().len(), 1);
    assert!(app.toggle_task(&task.id));
    assert_eq!(app.tasks()[0].status, TaskStatus::InProgress);
}
