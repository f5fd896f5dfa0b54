//! BrainBoost core: the engine behind a student study dashboard.
//!
//! The crate has three layers:
//!
//! * [`timer`] - a caller-driven pomodoro state machine plus a cancellable
//!   background ticker,
//! * [`stats`] - pure derived analytics over the record lists,
//! * [`storage`] - slot-based JSON persistence behind a small store trait.
//!
//! [`app::StudyApp`] ties them together: it owns the state, runs the
//! timer, and persists after every mutation. Hosts embed the controller
//! and poll [`app::StudyApp::drain_events`] for timer notifications.
//!
//! The crate never installs a `tracing` subscriber; hosts that want the
//! warnings decide where they go.

pub mod app;
pub mod error;
pub mod events;
pub mod records;
pub mod stats;
pub mod storage;
pub mod timer;

pub use app::{DashboardStats, StudyApp};
pub use error::{CoreError, Result};
pub use events::Event;
