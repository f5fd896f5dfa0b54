use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::StudySession;
use crate::timer::Phase;

/// Every timer state change produces an Event.
/// The host UI polls for events; it never inspects engine internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A work phase ran down to zero: exactly one session record is carried.
    WorkCompleted {
        session: StudySession,
        completed_work_cycles: u32,
        at: DateTime<Utc>,
    },
    /// A break phase ran down to zero. Never carries a session.
    BreakCompleted {
        at: DateTime<Utc>,
    },
}
