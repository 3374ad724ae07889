//! Tap gate that yields ambiguous touches to an ancestor scroll surface.
//!
//! A `TouchGate` wraps a tappable surface. Every accepted touch-down records a
//! [`TouchStamp`] and schedules a check `delay` later. When the check fires and
//! its stamp is still the latest touch-down for the surface, the gate closes
//! for one tick and then reopens; while closed the surface refuses new taps.
//! A check whose stamp was superseded by a newer touch-down, or whose touch
//! already ended, is stale and does nothing.
//!
//! Taps released before the delay fire their action immediately on release.
//! A touch still down when its check closes the gate stops counting as a tap:
//! releasing it later fires nothing. Closing never cancels the touch itself,
//! so a press recognized elsewhere on the same pointer carries on.

use crate::nodes::input::types::{PointerEvent, PointerEventKind, PointerId};
use scrolldrag_core::RuntimeHandle;
use scrolldrag_ui_graphics::Point;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Identity of one touch-down on a gated surface.
///
/// The sequence number keeps two touch-downs distinct even when the clock
/// reports the same uptime for both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchStamp {
    pub seq: u64,
    pub at: Duration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateState {
    pub last_touch_down: Option<TouchStamp>,
    pub closed: bool,
}

#[derive(Clone, Copy, Debug)]
struct TrackedTap {
    pointer: PointerId,
    origin: Point,
    // Cleared when the finger leaves the slop or the gate closes on this touch.
    tap_eligible: bool,
}

type TapAction = Rc<dyn Fn()>;

struct TouchGateInner {
    runtime: RuntimeHandle,
    delay: Duration,
    touch_slop: f32,
    state: Cell<GateState>,
    next_seq: Cell<u64>,
    tap: Cell<Option<TrackedTap>>,
    action: RefCell<TapAction>,
    closures: Cell<u64>,
}

#[derive(Clone)]
pub struct TouchGate {
    inner: Rc<TouchGateInner>,
}

impl TouchGate {
    pub fn new(runtime: RuntimeHandle, delay: Duration, touch_slop: f32) -> Self {
        Self {
            inner: Rc::new(TouchGateInner {
                runtime,
                delay,
                touch_slop,
                state: Cell::new(GateState::default()),
                next_seq: Cell::new(1),
                tap: Cell::new(None),
                action: RefCell::new(Rc::new(|| {})),
                closures: Cell::new(0),
            }),
        }
    }

    pub fn with_action(self, action: impl Fn() + 'static) -> Self {
        self.set_action(action);
        self
    }

    pub fn set_action(&self, action: impl Fn() + 'static) {
        *self.inner.action.borrow_mut() = Rc::new(action);
    }

    pub fn state(&self) -> GateState {
        self.inner.state.get()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.state.get().closed
    }

    /// Whether a tap is currently being tracked on this surface.
    pub fn is_pressed(&self) -> bool {
        self.inner.tap.get().is_some()
    }

    /// Number of times a fresh check has closed the gate.
    pub fn closure_count(&self) -> u64 {
        self.inner.closures.get()
    }

    /// Feeds a pointer event to the tappable surface.
    ///
    /// Returns true if the event belongs to a tap this surface tracks.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => self.on_down(event),
            PointerEventKind::Move => self.on_move(event),
            PointerEventKind::Up => self.on_up(event),
            PointerEventKind::Cancel => self.on_cancel(event),
        }
    }

    /// Records a touch-down and schedules its deferred check.
    ///
    /// Exposed for surfaces that detect presses themselves; `on_pointer_event`
    /// calls it for every accepted touch-down.
    pub fn touch_down(&self, at: Duration) -> TouchStamp {
        let inner = &self.inner;
        let seq = inner.next_seq.get();
        inner.next_seq.set(seq + 1);
        let stamp = TouchStamp { seq, at };

        let mut state = inner.state.get();
        state.last_touch_down = Some(stamp);
        inner.state.set(state);

        let weak = Rc::downgrade(&self.inner);
        let scheduled = inner.runtime.post_delayed(inner.delay, move || {
            if let Some(inner) = weak.upgrade() {
                TouchGateInner::check(&inner, stamp);
            }
        });
        if scheduled.is_none() {
            log::warn!("touch gate check for {:?} not scheduled: runtime is gone", stamp);
        }
        stamp
    }

    /// Touch released or cancelled: forget the stamp and reopen.
    pub fn touch_up(&self) {
        self.inner.state.set(GateState {
            last_touch_down: None,
            closed: false,
        });
    }

    /// Drops the tracked tap without firing its action, e.g. when an ancestor
    /// claims the touch.
    pub fn cancel(&self) {
        if self.inner.tap.take().is_some() {
            self.touch_up();
        }
    }

    fn on_down(&self, event: &PointerEvent) -> bool {
        if self.is_closed() {
            log::trace!("touch gate closed, refusing tap from pointer {}", event.id);
            return false;
        }
        if self.inner.tap.get().is_some() {
            return false;
        }
        self.inner.tap.set(Some(TrackedTap {
            pointer: event.id,
            origin: event.position,
            tap_eligible: true,
        }));
        self.touch_down(event.uptime);
        true
    }

    fn on_move(&self, event: &PointerEvent) -> bool {
        let Some(mut tap) = self.tracked(event.id) else {
            return false;
        };
        let travel = (event.position - tap.origin).distance();
        if tap.tap_eligible && travel > self.inner.touch_slop {
            tap.tap_eligible = false;
            self.inner.tap.set(Some(tap));
        }
        true
    }

    fn on_up(&self, event: &PointerEvent) -> bool {
        let Some(tap) = self.tracked(event.id) else {
            return false;
        };
        self.inner.tap.set(None);
        self.touch_up();
        if tap.tap_eligible && !event.is_consumed() {
            let action = self.inner.action.borrow().clone();
            action();
        }
        true
    }

    fn on_cancel(&self, event: &PointerEvent) -> bool {
        if self.tracked(event.id).is_none() {
            return false;
        }
        self.inner.tap.set(None);
        self.touch_up();
        true
    }

    fn tracked(&self, pointer: PointerId) -> Option<TrackedTap> {
        self.inner.tap.get().filter(|tap| tap.pointer == pointer)
    }
}

impl TouchGateInner {
    fn check(this: &Rc<Self>, stamp: TouchStamp) {
        let mut state = this.state.get();
        if state.last_touch_down != Some(stamp) {
            log::trace!("stale touch gate check for {:?}", stamp);
            return;
        }
        state.closed = true;
        this.state.set(state);
        this.closures.set(this.closures.get() + 1);
        if let Some(mut tap) = this.tap.get() {
            tap.tap_eligible = false;
            this.tap.set(Some(tap));
        }
        log::debug!("touch gate closed for touch {}", stamp.seq);

        let weak: Weak<Self> = Rc::downgrade(this);
        this.runtime.enqueue_ui_task(move || {
            if let Some(inner) = weak.upgrade() {
                let mut state = inner.state.get();
                state.closed = false;
                inner.state.set(state);
            }
        });
    }
}
