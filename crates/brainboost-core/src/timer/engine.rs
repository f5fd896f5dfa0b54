//! Focus timer engine.
//!
//! The engine is a caller-driven state machine. It does not use internal
//! threads - the caller (or a [`Ticker`](super::Ticker)) invokes `tick()`
//! once per elapsed second while the timer runs.
//!
//! ## Cycle
//!
//! ```text
//! Work(1500) --tick*--> 0  => session emitted, paused, Break(300)
//! Break(300) --tick*--> 0  => Work(1500), running preserved
//! ```
//!
//! The asymmetry is deliberate: a finished work phase waits for the user
//! before the break starts, while a finished break rolls straight into the
//! next work countdown.

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::records::{new_id, SessionKind, StudySession};

/// Work phase length in seconds (25 minutes).
pub const WORK_SECS: u32 = 25 * 60;
/// Break phase length in seconds (5 minutes).
pub const BREAK_SECS: u32 = 5 * 60;
/// Minutes credited per completed work phase.
pub const POMODORO_MINUTES: u32 = 25;
/// Subject recorded on engine-emitted sessions.
pub const FOCUS_SUBJECT: &str = "Focus Session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// Full countdown length for this phase, in seconds.
    pub fn full_secs(self) -> u32 {
        match self {
            Phase::Work => WORK_SECS,
            Phase::Break => BREAK_SECS,
        }
    }
}

/// Read-only view of the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub running: bool,
    pub completed_work_cycles: u32,
}

/// Core timer engine.
///
/// All transitions are total: invalid user actions (start while running,
/// pause while paused) are no-ops, never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    phase: Phase,
    remaining_secs: u32,
    running: bool,
    /// Lifetime count of completed work phases; survives resets and restarts.
    completed_work_cycles: u32,
}

impl TimerEngine {
    /// Create an engine in the initial paused-work state with a restored
    /// lifetime cycle count.
    pub fn new(completed_work_cycles: u32) -> Self {
        Self {
            phase: Phase::Work,
            remaining_secs: WORK_SECS,
            running: false,
            completed_work_cycles,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_work_cycles(&self) -> u32 {
        self.completed_work_cycles
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            running: self.running,
            completed_work_cycles: self.completed_work_cycles,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op if already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Halt the countdown. No-op if not running.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Return to a paused full work phase from any state. Past sessions
    /// and the cycle count are untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Work;
        self.remaining_secs = WORK_SECS;
        self.running = false;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance the countdown by one second. Returns a completion event
    /// when the current phase reaches zero on this tick.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_on(Local::now().date_naive())
    }

    /// `tick()` with an explicit session date, for deterministic callers.
    pub fn tick_on(&mut self, today: NaiveDate) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        match self.phase {
            Phase::Work => {
                let session = StudySession {
                    id: new_id(),
                    subject: FOCUS_SUBJECT.to_string(),
                    duration_min: POMODORO_MINUTES,
                    date: today,
                    kind: SessionKind::Pomodoro,
                };
                self.completed_work_cycles += 1;
                self.running = false;
                self.phase = Phase::Break;
                self.remaining_secs = BREAK_SECS;
                Some(Event::WorkCompleted {
                    session,
                    completed_work_cycles: self.completed_work_cycles,
                    at: Utc::now(),
                })
            }
            Phase::Break => {
                // `running` is intentionally left as-is.
                self.phase = Phase::Work;
                self.remaining_secs = WORK_SECS;
                Some(Event::BreakCompleted { at: Utc::now() })
            }
        }
    }
}
