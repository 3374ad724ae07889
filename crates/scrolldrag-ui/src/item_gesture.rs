//! Per-item wiring between the recognizer, the touch gate and the store.
//!
//! An [`ItemGestureHandle`] owns one item's [`PressDragRecognizer`] and
//! [`TouchGate`]. It drives the recognizer's hold timer on the runtime and
//! turns recognizer signals into store mutations:
//!
//! * `Armed` / `DragStarted` set the press flag on the next tick, once per
//!   gesture.
//! * `Committed` adds the delta to the store immediately and clears the press
//!   flag on the next tick.
//! * `Cancelled` clears the press flag on the next tick and commits nothing.

use crate::config::GestureConfig;
use crate::drag_store::{DragAccumulatorStore, ItemId};
use scrolldrag_core::{RuntimeHandle, TimerId};
use scrolldrag_foundation::{
    GesturePhase, GestureSignal, PointerEvent, PressDragRecognizer, TouchGate,
};
use scrolldrag_ui_graphics::Offset;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// What the renderer reads for one item each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemRenderState {
    pub displayed_offset: Offset,
    pub pressing: bool,
}

struct HandleInner {
    item: ItemId,
    recognizer: RefCell<PressDragRecognizer>,
    gate: TouchGate,
    store: DragAccumulatorStore,
    runtime: RuntimeHandle,
    // Generation whose press flag has been raised and not yet released.
    pressed_generation: Cell<Option<u64>>,
    hold_timer: Cell<Option<TimerId>>,
}

#[derive(Clone)]
pub struct ItemGestureHandle {
    inner: Rc<HandleInner>,
}

impl ItemGestureHandle {
    pub fn new(
        item: ItemId,
        store: DragAccumulatorStore,
        runtime: RuntimeHandle,
        config: &GestureConfig,
    ) -> Self {
        let gate = TouchGate::new(runtime.clone(), config.gate_delay, config.touch_slop);
        Self {
            inner: Rc::new(HandleInner {
                item,
                recognizer: RefCell::new(PressDragRecognizer::new(
                    config.min_hold,
                    config.touch_slop,
                )),
                gate,
                store,
                runtime,
                pressed_generation: Cell::new(None),
                hold_timer: Cell::new(None),
            }),
        }
    }

    pub fn item(&self) -> ItemId {
        self.inner.item
    }

    pub fn gate(&self) -> &TouchGate {
        &self.inner.gate
    }

    pub fn phase(&self) -> GesturePhase {
        self.inner.recognizer.borrow().phase()
    }

    /// Whether a touch is down on this item, confirmed or not.
    pub fn is_tracking(&self) -> bool {
        self.inner.recognizer.borrow().is_tracking() || self.inner.gate.is_pressed()
    }

    pub fn live_delta(&self) -> Offset {
        self.inner.recognizer.borrow().live_delta()
    }

    /// Accumulated offset plus the live delta of an in-progress drag.
    pub fn displayed_offset(&self) -> Offset {
        self.inner.store.offset(self.inner.item) + self.live_delta()
    }

    pub fn is_pressing(&self) -> bool {
        self.inner.store.is_pressing(self.inner.item)
    }

    pub fn render_state(&self) -> ItemRenderState {
        ItemRenderState {
            displayed_offset: self.displayed_offset(),
            pressing: self.is_pressing(),
        }
    }

    pub fn set_tap_action(&self, action: impl Fn() + 'static) {
        self.inner.gate.set_action(action);
    }

    /// Routes one event through the recognizer, then the gate.
    ///
    /// Returns true if either of them tracks the event's pointer.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        let inner = &self.inner;
        let (signals, started, tracked) = {
            let mut recognizer = inner.recognizer.borrow_mut();
            let generation = recognizer.generation();
            let tracked_before = recognizer.pointer() == Some(event.id);
            let signals = recognizer.on_pointer_event(event);
            let started = recognizer.generation() != generation;
            (signals, started, tracked_before || started)
        };
        if started {
            HandleInner::schedule_hold_check(inner);
        }
        for signal in signals {
            inner.apply(signal);
        }
        inner.sync_hold_timer();

        let gated = inner.gate.on_pointer_event(event);
        tracked || gated
    }

    /// Abandons the current touch, e.g. because the row's scroll claimed it.
    pub fn cancel(&self) {
        let signal = self.inner.recognizer.borrow_mut().cancel();
        if let Some(signal) = signal {
            self.inner.apply(signal);
        }
        self.inner.sync_hold_timer();
        self.inner.gate.cancel();
    }
}

impl HandleInner {
    fn schedule_hold_check(this: &Rc<Self>) {
        let (generation, deadline) = {
            let recognizer = this.recognizer.borrow();
            (recognizer.generation(), recognizer.pending_hold_deadline())
        };
        let Some(deadline) = deadline else {
            return;
        };
        if let Some(previous) = this.hold_timer.take() {
            this.runtime.cancel_timer(previous);
        }

        let delay = deadline.saturating_sub(this.runtime.now());
        let weak = Rc::downgrade(this);
        let timer = this.runtime.post_delayed(delay, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.hold_timer.set(None);
            let now = inner.runtime.now();
            let signal = inner
                .recognizer
                .borrow_mut()
                .on_hold_deadline(generation, now);
            match signal {
                Some(signal) => inner.apply(signal),
                None => log::trace!(
                    "item {}: hold check for gesture {} ignored",
                    inner.item,
                    generation
                ),
            }
        });
        this.hold_timer.set(timer);
    }

    /// Drops the pending hold timer once the recognizer no longer waits on it.
    fn sync_hold_timer(&self) {
        if self.recognizer.borrow().pending_hold_deadline().is_some() {
            return;
        }
        if let Some(timer) = self.hold_timer.take() {
            self.runtime.cancel_timer(timer);
        }
    }

    fn apply(&self, signal: GestureSignal) {
        match signal {
            GestureSignal::Armed | GestureSignal::DragStarted(_) => self.raise_pressed(),
            GestureSignal::DragMoved(_) => {}
            GestureSignal::Committed(delta) => {
                if !delta.is_zero() {
                    self.store.commit(self.item, delta);
                }
                self.release_pressed();
            }
            GestureSignal::Cancelled => {
                log::debug!("item {}: gesture cancelled, nothing committed", self.item);
                self.release_pressed();
            }
            GestureSignal::Rejected(failure) => {
                log::trace!("item {}: press rejected ({:?})", self.item, failure);
            }
        }
    }

    fn raise_pressed(&self) {
        let generation = self.recognizer.borrow().generation();
        if self.pressed_generation.get() == Some(generation) {
            return;
        }
        self.pressed_generation.set(Some(generation));
        let store = self.store.clone();
        let item = self.item;
        self.runtime
            .enqueue_ui_task(move || store.set_pressing(item, true));
    }

    fn release_pressed(&self) {
        if self.pressed_generation.take().is_none() {
            return;
        }
        let store = self.store.clone();
        let item = self.item;
        self.runtime
            .enqueue_ui_task(move || store.set_pressing(item, false));
    }
}
