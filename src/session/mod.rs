//! Session lifecycle: start, tick, end and restart, plus the timers and the
//! high score store a session depends on.

pub mod controller;
pub mod persistence;
pub mod scheduler;

pub use controller::{EndReason, SessionController, SessionStatus, Snapshot, CLOCK_INTERVAL};
pub use persistence::{HighScoreStore, JsonFileStore, MemoryStore, HIGH_SCORE_KEY};
pub use scheduler::{
    ManualScheduler, ManualTimer, Scheduler, TaskHandle, TimerEvent, TimerKind, TokioScheduler,
};
