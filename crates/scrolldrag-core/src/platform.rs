//! Platform abstraction traits for runtime services.
//!
//! These traits let the engine delegate frame scheduling and timekeeping to
//! the host, so the same runtime drives a real event loop and a test clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use web_time::Instant;

/// Schedules work for the runtime.
///
/// Called whenever a task or timer is queued so the host can arrange for
/// `RuntimeHandle::run_tick` to be invoked.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
///
/// Time is expressed as uptime: the duration since an arbitrary origin fixed
/// for the lifetime of the clock. Pointer event timestamps use the same base.
pub trait Clock: Send + Sync {
    /// Returns the current uptime.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `web_time::Instant`, usable on native and WASM.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually driven clock for deterministic tests and scripted replays.
#[derive(Debug, Default)]
pub struct TestClock {
    nanos: AtomicU64,
}

impl TestClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.nanos
            .fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Moves the clock to `to`. Time never runs backwards; earlier targets
    /// are ignored.
    pub fn set(&self, to: Duration) {
        self.nanos
            .fetch_max(to.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
