//! Application controller.
//!
//! [`StudyApp`] owns all record lists, the user profile, and the timer
//! engine behind a single mutex, and is the only place that talks to the
//! store. Every mutation persists the affected slot afterwards; the lock
//! is never held across store I/O. A failed write is logged as a warning
//! and the in-memory state stays authoritative for the rest of the
//! session.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::error::Result;
use crate::events::Event;
use crate::records::{
    ForumPost, Goal, Material, MaterialKind, Priority, SessionKind, StudySession, Task,
    UserProfile,
};
use crate::stats;
use crate::stats::{Insight, SubjectHours, WeekdayHours};
use crate::storage::{load_or_default, save_json, JsonFileStore, KeyValueStore, Slot};
use crate::timer::{Ticker, TimerEngine, TimerSnapshot};

/// Everything the analytics view needs, recomputed from the current lists.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub total_study_minutes: u32,
    pub today_study_minutes: u32,
    pub completion_rate: u8,
    pub weekday_hours: WeekdayHours,
    pub subject_hours: Vec<SubjectHours>,
    pub consecutive_study_days: u32,
    pub average_session_hours: f64,
    /// Lifetime completed work phases.
    pub completed_pomodoros: u32,
    pub insights: Vec<Insight>,
}

struct State {
    profile: Option<UserProfile>,
    tasks: Vec<Task>,
    sessions: Vec<StudySession>,
    materials: Vec<Material>,
    goals: Vec<Goal>,
    posts: Vec<ForumPost>,
    engine: TimerEngine,
    pending_events: Vec<Event>,
}

/// The study dashboard controller.
pub struct StudyApp {
    store: Arc<dyn KeyValueStore>,
    state: Arc<Mutex<State>>,
    ticker: Option<Ticker>,
}

impl StudyApp {
    /// Open with the default file-backed store.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn open() -> Result<Self> {
        Ok(Self::with_store(JsonFileStore::open()?))
    }

    /// Open over any store. Every slot is read once; absent or malformed
    /// slots load as empty defaults, never fatally.
    pub fn with_store(store: impl KeyValueStore + 'static) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(store);

        let completed_cycles = match store.load(Slot::PomodoroCount) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(payload = %raw, "malformed pomodoro count, starting at 0");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, "failed to read pomodoro count, starting at 0");
                0
            }
        };

        let state = State {
            profile: load_or_default(store.as_ref(), Slot::User),
            tasks: load_or_default(store.as_ref(), Slot::Tasks),
            sessions: load_or_default(store.as_ref(), Slot::Sessions),
            materials: load_or_default(store.as_ref(), Slot::Materials),
            goals: load_or_default(store.as_ref(), Slot::Goals),
            posts: load_or_default(store.as_ref(), Slot::Posts),
            engine: TimerEngine::new(completed_cycles),
            pending_events: Vec::new(),
        };

        Self {
            store,
            state: Arc::new(Mutex::new(state)),
            ticker: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock is a bug; the poisoned state is
        // still internally consistent, so keep going.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Persist one slot, warning instead of failing: in-memory state
    /// remains the source of truth.
    fn persist<T: serde::Serialize>(&self, slot: Slot, value: &T) {
        persist_slot(self.store.as_ref(), slot, value);
    }

    // ── Profile ──────────────────────────────────────────────────────

    pub fn profile(&self) -> Option<UserProfile> {
        self.lock().profile.clone()
    }

    pub fn set_profile(&self, profile: UserProfile) {
        let snapshot = {
            let mut state = self.lock();
            state.profile = Some(profile);
            state.profile.clone()
        };
        self.persist(Slot::User, &snapshot);
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Create a pending task at the head of the list.
    pub fn add_task(
        &self,
        title: impl Into<String>,
        subject: impl Into<String>,
        priority: Priority,
        due_date: NaiveDate,
        description: Option<String>,
    ) -> Result<Task> {
        let task = Task::new(title, subject, priority, due_date, description)?;
        let snapshot = {
            let mut state = self.lock();
            state.tasks.insert(0, task.clone());
            state.tasks.clone()
        };
        self.persist(Slot::Tasks, &snapshot);
        Ok(task)
    }

    /// Advance a task one step along the status cycle. Returns false for
    /// an unknown id.
    pub fn toggle_task(&self, id: &str) -> bool {
        let snapshot = {
            let mut state = self.lock();
            let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) else {
                return false;
            };
            task.toggle_status();
            state.tasks.clone()
        };
        self.persist(Slot::Tasks, &snapshot);
        true
    }

    pub fn delete_task(&self, id: &str) -> bool {
        let snapshot = {
            let mut state = self.lock();
            let before = state.tasks.len();
            state.tasks.retain(|t| t.id != id);
            if state.tasks.len() == before {
                return false;
            }
            state.tasks.clone()
        };
        self.persist(Slot::Tasks, &snapshot);
        true
    }

    // ── Sessions ─────────────────────────────────────────────────────

    pub fn sessions(&self) -> Vec<StudySession> {
        self.lock().sessions.clone()
    }

    /// Manually log free study time.
    pub fn log_session(
        &self,
        subject: impl Into<String>,
        duration_min: u32,
        date: NaiveDate,
    ) -> Result<StudySession> {
        let session = StudySession::new(subject, duration_min, date, SessionKind::Free)?;
        let snapshot = {
            let mut state = self.lock();
            state.sessions.insert(0, session.clone());
            state.sessions.clone()
        };
        self.persist(Slot::Sessions, &snapshot);
        Ok(session)
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn goals(&self) -> Vec<Goal> {
        self.lock().goals.clone()
    }

    pub fn add_goal(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        target_date: NaiveDate,
        progress: u8,
        category: impl Into<String>,
    ) -> Result<Goal> {
        let goal = Goal::new(title, description, target_date, progress, category)?;
        let snapshot = {
            let mut state = self.lock();
            state.goals.insert(0, goal.clone());
            state.goals.clone()
        };
        self.persist(Slot::Goals, &snapshot);
        Ok(goal)
    }

    pub fn set_goal_progress(&self, id: &str, progress: u8) -> bool {
        let snapshot = {
            let mut state = self.lock();
            let Some(goal) = state.goals.iter_mut().find(|g| g.id == id) else {
                return false;
            };
            goal.set_progress(progress);
            state.goals.clone()
        };
        self.persist(Slot::Goals, &snapshot);
        true
    }

    pub fn delete_goal(&self, id: &str) -> bool {
        let snapshot = {
            let mut state = self.lock();
            let before = state.goals.len();
            state.goals.retain(|g| g.id != id);
            if state.goals.len() == before {
                return false;
            }
            state.goals.clone()
        };
        self.persist(Slot::Goals, &snapshot);
        true
    }

    // ── Materials ────────────────────────────────────────────────────

    pub fn materials(&self) -> Vec<Material> {
        self.lock().materials.clone()
    }

    pub fn add_material(
        &self,
        title: impl Into<String>,
        kind: MaterialKind,
        subject: impl Into<String>,
        content: Option<String>,
        url: Option<String>,
    ) -> Result<Material> {
        let material = Material::new(
            title,
            kind,
            subject,
            content,
            url,
            Local::now().date_naive(),
        )?;
        let snapshot = {
            let mut state = self.lock();
            state.materials.insert(0, material.clone());
            state.materials.clone()
        };
        self.persist(Slot::Materials, &snapshot);
        Ok(material)
    }

    pub fn delete_material(&self, id: &str) -> bool {
        let snapshot = {
            let mut state = self.lock();
            let before = state.materials.len();
            state.materials.retain(|m| m.id != id);
            if state.materials.len() == before {
                return false;
            }
            state.materials.clone()
        };
        self.persist(Slot::Materials, &snapshot);
        true
    }

    // ── Forum posts ──────────────────────────────────────────────────

    pub fn posts(&self) -> Vec<ForumPost> {
        self.lock().posts.clone()
    }

    /// Publish a post authored by the current profile.
    pub fn add_post(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        subject: impl Into<String>,
    ) -> Result<ForumPost> {
        let author = self
            .lock()
            .profile
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let post = ForumPost::new(author, title, content, subject, Local::now().date_naive())?;
        let snapshot = {
            let mut state = self.lock();
            state.posts.insert(0, post.clone());
            state.posts.clone()
        };
        self.persist(Slot::Posts, &snapshot);
        Ok(post)
    }

    pub fn like_post(&self, id: &str) -> bool {
        let snapshot = {
            let mut state = self.lock();
            let Some(post) = state.posts.iter_mut().find(|p| p.id == id) else {
                return false;
            };
            post.like();
            state.posts.clone()
        };
        self.persist(Slot::Posts, &snapshot);
        true
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn timer_snapshot(&self) -> TimerSnapshot {
        self.lock().engine.snapshot()
    }

    /// Start the countdown and the one-second wakeup. Replaces any
    /// previous wakeup so at most one is ever registered. No-op if the
    /// timer is already running.
    pub fn start_timer(&mut self) {
        {
            let mut state = self.lock();
            let Some(event) = state.engine.start() else {
                return;
            };
            debug!(phase = ?state.engine.phase(), "timer started");
            state.pending_events.push(event);
        }

        if let Some(mut old) = self.ticker.take() {
            old.cancel();
        }
        let state = Arc::clone(&self.state);
        let store = Arc::clone(&self.store);
        self.ticker = Some(Ticker::every(Duration::from_secs(1), move || {
            tick_shared(&state, store.as_ref())
        }));
    }

    /// Pause the countdown, cancelling the wakeup before touching the
    /// engine so no tick can land after this returns.
    pub fn pause_timer(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        let mut state = self.lock();
        if let Some(event) = state.engine.pause() {
            debug!(remaining = state.engine.remaining_secs(), "timer paused");
            state.pending_events.push(event);
        }
    }

    /// Return to a paused full work phase. Past sessions and the cycle
    /// count are untouched.
    pub fn reset_timer(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        let mut state = self.lock();
        if let Some(event) = state.engine.reset() {
            state.pending_events.push(event);
        }
    }

    /// Advance the timer by one second without the background wakeup,
    /// for hosts that drive their own loop.
    pub fn tick_timer(&self) {
        tick_shared(&self.state, self.store.as_ref());
    }

    /// Take all events produced since the last call. The host UI polls
    /// this.
    pub fn drain_events(&self) -> Vec<Event> {
        std::mem::take(&mut self.lock().pending_events)
    }

    // ── Analytics ────────────────────────────────────────────────────

    pub fn dashboard(&self) -> DashboardStats {
        self.dashboard_on(Local::now().date_naive())
    }

    /// [`dashboard`](Self::dashboard) with an explicit "today".
    pub fn dashboard_on(&self, today: NaiveDate) -> DashboardStats {
        let state = self.lock();
        let pomodoros_today = state
            .sessions
            .iter()
            .filter(|s| s.kind == SessionKind::Pomodoro && s.date == today)
            .count() as u32;
        DashboardStats {
            total_study_minutes: stats::total_study_minutes(&state.sessions),
            today_study_minutes: stats::today_study_minutes(&state.sessions, today),
            completion_rate: stats::completion_rate(&state.tasks),
            weekday_hours: stats::hours_by_weekday(&state.sessions),
            subject_hours: stats::hours_by_subject(&state.sessions),
            consecutive_study_days: stats::consecutive_study_days(&state.sessions, today),
            average_session_hours: stats::average_session_hours(&state.sessions),
            completed_pomodoros: state.engine.completed_work_cycles(),
            insights: stats::insights(&state.tasks, &state.sessions, pomodoros_today, today),
        }
    }
}

impl Drop for StudyApp {
    fn drop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

fn persist_slot<T: serde::Serialize>(store: &dyn KeyValueStore, slot: Slot, value: &T) {
    if let Err(err) = save_json(store, slot, value) {
        warn!(slot = %slot, error = %err, "failed to persist slot; in-memory state kept");
    }
}

/// One engine tick plus the follow-up work: session append, counter
/// persistence, event queueing. Returns whether the engine still runs
/// (the ticker stops itself otherwise). The lock is released before any
/// store I/O.
fn tick_shared(state: &Arc<Mutex<State>>, store: &dyn KeyValueStore) -> bool {
    let (session_snapshot, cycle_count, still_running) = {
        let mut state = match state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let event = state.engine.tick();
        let mut snapshot = None;
        let mut cycles = None;
        if let Some(event) = event {
            if let Event::WorkCompleted {
                session,
                completed_work_cycles,
                ..
            } = &event
            {
                state.sessions.insert(0, session.clone());
                snapshot = Some(state.sessions.clone());
                cycles = Some(*completed_work_cycles);
            }
            state.pending_events.push(event);
        }
        (snapshot, cycles, state.engine.is_running())
    };

    if let Some(sessions) = session_snapshot {
        persist_slot(store, Slot::Sessions, &sessions);
    }
    if let Some(count) = cycle_count {
        // Decimal string, matching the stored format.
        if let Err(err) = store.save(Slot::PomodoroCount, &count.to_string()) {
            warn!(error = %err, "failed to persist pomodoro count; in-memory state kept");
        }
    }
    still_running
}
