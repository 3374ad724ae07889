use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::Duration;

use crate::platform::{Clock, RuntimeScheduler};
use crate::RuntimeError;

type UiTask = Box<dyn FnOnce() + 'static>;

/// Identifies a pending `post_delayed` timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct TimerEntry {
    id: TimerId,
    deadline: Duration,
    task: UiTask,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    clock: Arc<dyn Clock>,
    needs_frame: Cell<bool>,
    local_tasks: RefCell<VecDeque<UiTask>>,
    // Sorted by (deadline, id) so timers with equal deadlines keep
    // registration order.
    timers: RefCell<Vec<TimerEntry>>,
    next_timer_id: Cell<u64>,
    tick: Cell<u64>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>, clock: Arc<dyn Clock>) -> Self {
        Self {
            scheduler,
            clock,
            needs_frame: Cell::new(false),
            local_tasks: RefCell::new(VecDeque::new()),
            timers: RefCell::new(Vec::new()),
            next_timer_id: Cell::new(1),
            tick: Cell::new(0),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Queues a closure for the next tick.
    ///
    /// The closure may capture `Rc`/`RefCell` values because it never leaves
    /// the runtime thread.
    fn enqueue_ui_task(&self, task: UiTask) {
        self.local_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn post_delayed(&self, delay: Duration, task: UiTask) -> TimerId {
        let id = TimerId(self.next_timer_id.get());
        self.next_timer_id.set(id.0 + 1);
        let deadline = self.now() + delay;
        let mut timers = self.timers.borrow_mut();
        let index = timers.partition_point(|entry| (entry.deadline, entry.id) <= (deadline, id));
        timers.insert(index, TimerEntry { id, deadline, task });
        drop(timers);
        log::trace!("timer {:?} armed for {:?}", id, deadline);
        self.schedule();
        id
    }

    fn cancel_timer(&self, id: TimerId) -> bool {
        let mut timers = self.timers.borrow_mut();
        let before = timers.len();
        timers.retain(|entry| entry.id != id);
        before != timers.len()
    }

    fn take_due_timers(&self, now: Duration) -> SmallVec<[TimerEntry; 4]> {
        let mut timers = self.timers.borrow_mut();
        let due = timers.partition_point(|entry| entry.deadline <= now);
        timers.drain(..due).collect()
    }

    fn has_pending_ui(&self) -> bool {
        !self.local_tasks.borrow().is_empty()
    }

    fn has_due_timers(&self) -> bool {
        let now = self.now();
        self.timers
            .borrow()
            .first()
            .is_some_and(|entry| entry.deadline <= now)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.timers.borrow().first().map(|entry| entry.deadline)
    }

    /// Runs one tick: every task queued before the tick started, then every
    /// timer whose deadline has passed. Work queued while the tick runs waits
    /// for the following tick.
    fn run_tick(&self) -> bool {
        let tick = self.tick.get() + 1;
        self.tick.set(tick);
        self.needs_frame.set(false);

        let queued = std::mem::take(&mut *self.local_tasks.borrow_mut());
        let due = self.take_due_timers(self.now());
        let executed = !queued.is_empty() || !due.is_empty();
        if executed {
            log::trace!(
                "tick {}: {} queued task(s), {} timer(s)",
                tick,
                queued.len(),
                due.len()
            );
        }

        for task in queued {
            task();
        }
        for timer in due {
            (timer.task)();
        }

        if self.has_pending_ui() || self.has_due_timers() {
            self.needs_frame.set(true);
        }
        executed
    }

    fn pump_until_idle(&self, max_ticks: usize) -> Result<usize, RuntimeError> {
        let mut ticks = 0;
        while self.has_pending_ui() || self.has_due_timers() {
            if ticks >= max_ticks {
                log::warn!("runtime did not settle within {} ticks", max_ticks);
                return Err(RuntimeError::Livelock { ticks });
            }
            self.run_tick();
            ticks += 1;
        }
        Ok(ticks)
    }
}

/// Owner of the cooperative scheduler.
///
/// Components hold a `RuntimeHandle`; the host keeps the `Runtime` alive and
/// drives it by calling `run_tick` once per frame.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler, clock)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn now(&self) -> Duration {
        self.inner.now()
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn run_tick(&self) -> bool {
        self.inner.run_tick()
    }

    /// Runs ticks until no queued task and no due timer remain.
    ///
    /// Timers whose deadline is still in the future do not keep the runtime
    /// busy. Returns the number of ticks executed.
    pub fn pump_until_idle(&self, max_ticks: usize) -> Result<usize, RuntimeError> {
        self.inner.pump_until_idle(max_ticks)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.next_deadline()
    }

    pub fn has_pending_ui(&self) -> bool {
        self.inner.has_pending_ui()
    }
}

/// Weak handle used by components to defer work onto the runtime.
///
/// Every operation is a no-op once the runtime has been dropped.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Current uptime, or zero once the runtime has been dropped.
    pub fn now(&self) -> Duration {
        self.inner
            .upgrade()
            .map(|inner| inner.now())
            .unwrap_or_default()
    }

    /// Runs `task` on the next tick.
    pub fn enqueue_ui_task(&self, task: impl FnOnce() + 'static) {
        if let Some(inner) = self.inner.upgrade() {
            inner.enqueue_ui_task(Box::new(task));
        } else {
            log::warn!("dropping ui task: runtime is gone");
        }
    }

    /// Runs `task` on the first tick at or after `now + delay`.
    pub fn post_delayed(&self, delay: Duration, task: impl FnOnce() + 'static) -> Option<TimerId> {
        self.inner
            .upgrade()
            .map(|inner| inner.post_delayed(delay, Box::new(task)))
    }

    /// Removes a pending timer. Returns false if it already fired.
    pub fn cancel_timer(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.cancel_timer(id))
    }

    pub fn run_tick(&self) -> Result<bool, RuntimeError> {
        self.inner
            .upgrade()
            .map(|inner| inner.run_tick())
            .ok_or(RuntimeError::RuntimeDropped)
    }

    pub fn pump_until_idle(&self, max_ticks: usize) -> Result<usize, RuntimeError> {
        match self.inner.upgrade() {
            Some(inner) => inner.pump_until_idle(max_ticks),
            None => Err(RuntimeError::RuntimeDropped),
        }
    }

    pub fn has_pending_ui(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.has_pending_ui())
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.upgrade().and_then(|inner| inner.next_deadline())
    }
}
