mod engine;
mod ticker;

pub use engine::{
    Phase, TimerEngine, TimerSnapshot, BREAK_SECS, FOCUS_SUBJECT, POMODORO_MINUTES, WORK_SECS,
};
pub use ticker::Ticker;
