//! Scroll container state and gesture detection.
//!
//! `ScrollState` holds the container's scroll position. `ScrollGestureDetector`
//! runs after the items of the container have seen an event and claims the
//! touch as a scroll once the finger sits more than the touch slop away from
//! where it went down, measured along the scroll axis. Travel that returns to
//! the start does not count.

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::nodes::input::types::{PointerEvent, PointerEventKind, PointerId};
use scrolldrag_ui_graphics::{Offset, Point};
use std::cell::Cell;
use std::rc::Rc;

/// Orientation for scrolling - horizontal or vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Low-level scrollable state interface.
///
/// Implemented by scroll state holders to consume deltas from gesture input.
pub trait ScrollableState {
    /// Consume a scroll delta and return the amount consumed (may be less
    /// than requested at the bounds).
    fn consume_scroll_delta(&self, delta: f32) -> f32;

    /// Whether this scrollable state is currently scrolling.
    fn is_scroll_in_progress(&self) -> bool;

    /// Called when a scroll gesture claims or releases a touch.
    fn set_scroll_in_progress(&self, _in_progress: bool) {}
}

/// State object for scroll position tracking.
#[derive(Clone)]
pub struct ScrollState {
    inner: Rc<ScrollStateInner>,
}

struct ScrollStateInner {
    value: Cell<f32>,
    /// content_size - viewport_size
    max_value: Cell<f32>,
    in_progress: Cell<bool>,
}

impl ScrollState {
    pub fn new(initial: f32) -> Self {
        Self {
            inner: Rc::new(ScrollStateInner {
                value: Cell::new(initial.max(0.0)),
                max_value: Cell::new(f32::INFINITY),
                in_progress: Cell::new(false),
            }),
        }
    }

    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn max_value(&self) -> f32 {
        self.inner.max_value.get()
    }

    pub fn set_max_value(&self, max: f32) {
        let max = max.max(0.0);
        self.inner.max_value.set(max);
        if self.value() > max {
            self.inner.value.set(max);
        }
    }

    /// Scrolls by the given delta, clamping to `[0, max_value]`.
    /// Returns the actual amount scrolled.
    pub fn dispatch_raw_delta(&self, delta: f32) -> f32 {
        let current = self.value();
        let new_value = (current + delta).clamp(0.0, self.max_value());
        let actual_delta = new_value - current;
        if actual_delta.abs() > 0.001 {
            self.inner.value.set(new_value);
        }
        actual_delta
    }

    pub fn scroll_to(&self, position: f32) {
        self.inner
            .value
            .set(position.clamp(0.0, self.max_value()));
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ScrollableState for ScrollState {
    fn consume_scroll_delta(&self, delta: f32) -> f32 {
        self.dispatch_raw_delta(delta)
    }

    fn is_scroll_in_progress(&self) -> bool {
        self.inner.in_progress.get()
    }

    fn set_scroll_in_progress(&self, in_progress: bool) {
        self.inner.in_progress.set(in_progress);
    }
}

/// Detects drag gestures on the container and converts them to scroll deltas.
pub struct ScrollGestureDetector {
    state: Rc<dyn ScrollableState>,
    orientation: Orientation,
    enabled: bool,
    touch_slop: f32,
    pointer: Option<PointerId>,
    last_position: Option<Point>,
    slop_passed: bool,
    // Where slop is measured from: the touch-down, or the last position an
    // item consumed.
    slop_origin: Option<Point>,
}

impl ScrollGestureDetector {
    pub fn new(state: Rc<dyn ScrollableState>, orientation: Orientation, enabled: bool) -> Self {
        Self {
            state,
            orientation,
            enabled,
            touch_slop: DRAG_THRESHOLD,
            pointer: None,
            last_position: None,
            slop_passed: false,
            slop_origin: None,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    /// True once the current touch has been claimed as a scroll.
    pub fn is_scrolling(&self) -> bool {
        self.slop_passed
    }

    /// Returns true if the event was handled as part of a tracked scroll.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        if !self.enabled {
            return false;
        }

        match event.kind {
            PointerEventKind::Down => {
                if event.is_consumed() || self.pointer.is_some() {
                    return false;
                }
                self.pointer = Some(event.id);
                self.slop_passed = false;
                self.slop_origin = Some(event.position);
                self.last_position = Some(event.position);
                // Down is never consumed so the items keep seeing the touch.
                true
            }
            PointerEventKind::Move => {
                if self.pointer != Some(event.id) {
                    return false;
                }
                let Some(last) = self.last_position.replace(event.position) else {
                    return false;
                };
                if event.is_consumed() {
                    // An item owns this touch; stay in sync without scrolling.
                    self.slop_origin = Some(event.position);
                    return false;
                }

                // Dragging content left reveals content to the right.
                let delta = -self.along_axis(event.position - last);

                if !self.slop_passed {
                    let origin = self.slop_origin.unwrap_or(last);
                    let travel = self.along_axis(event.position - origin).abs();
                    if travel > self.touch_slop {
                        self.slop_passed = true;
                        self.state_set_in_progress(true);
                        log::debug!("scroll claimed pointer {}", event.id);
                    }
                }
                if self.slop_passed {
                    self.state.consume_scroll_delta(delta);
                    event.consume();
                }
                true
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                if self.pointer != Some(event.id) {
                    return false;
                }
                if self.slop_passed {
                    event.consume();
                }
                self.state_set_in_progress(false);
                self.pointer = None;
                self.last_position = None;
                self.slop_passed = false;
                self.slop_origin = None;
                true
            }
        }
    }

    fn along_axis(&self, offset: Offset) -> f32 {
        match self.orientation {
            Orientation::Horizontal => offset.x,
            Orientation::Vertical => offset.y,
        }
    }

    fn state_set_in_progress(&self, in_progress: bool) {
        self.state.set_scroll_in_progress(in_progress);
    }
}
