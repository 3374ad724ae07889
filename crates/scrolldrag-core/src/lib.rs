//! Cooperative runtime for the scrolldrag touch engine.
//!
//! Everything runs on one UI-bound context. Work is deferred either to the
//! next tick (`RuntimeHandle::enqueue_ui_task`) or by wall-clock duration
//! (`RuntimeHandle::post_delayed`); there are no blocking waits.

mod platform;
mod runtime;

pub use platform::{Clock, DefaultScheduler, RuntimeScheduler, SystemClock, TestClock};
pub use runtime::{Runtime, RuntimeHandle, TimerId};

/// Default bound on ticks for `Runtime::pump_until_idle`.
pub const DEFAULT_MAX_PUMP_TICKS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The runtime kept producing work for more ticks than allowed.
    Livelock { ticks: usize },
    /// The runtime behind a handle has already been dropped.
    RuntimeDropped,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::Livelock { ticks } => {
                write!(f, "runtime still busy after {ticks} ticks")
            }
            RuntimeError::RuntimeDropped => write!(f, "runtime has been dropped"),
        }
    }
}

impl std::error::Error for RuntimeError {}

pub mod prelude {
    pub use crate::{Clock, Runtime, RuntimeError, RuntimeHandle, TestClock, TimerId};
}
