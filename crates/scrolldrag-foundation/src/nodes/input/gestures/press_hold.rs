//! Press-hold detector: confirms a press once a touch has stayed down for a
//! minimum duration without travelling beyond the touch slop.

use crate::gesture_constants::{DRAG_THRESHOLD, LONG_PRESS_MIN_HOLD};
use scrolldrag_ui_graphics::Point;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldFailure {
    /// The touch ended before the minimum hold elapsed (a plain tap).
    ReleasedEarly,
    /// The touch travelled beyond the slop before the hold was confirmed.
    MovedBeyondSlop,
    /// The platform cancelled the touch, or another handler claimed it.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldOutcome {
    Pending,
    Held,
    Failed(HoldFailure),
}

#[derive(Clone, Copy, Debug)]
struct PressStart {
    at: Duration,
    position: Point,
    last_position: Point,
}

#[derive(Clone, Debug)]
pub struct PressHoldDetector {
    min_hold: Duration,
    touch_slop: f32,
    press: Option<PressStart>,
}

impl Default for PressHoldDetector {
    fn default() -> Self {
        Self::new(LONG_PRESS_MIN_HOLD, DRAG_THRESHOLD)
    }
}

impl PressHoldDetector {
    pub fn new(min_hold: Duration, touch_slop: f32) -> Self {
        Self {
            min_hold,
            touch_slop,
            press: None,
        }
    }

    pub fn start(&mut self, position: Point, at: Duration) {
        self.press = Some(PressStart {
            at,
            position,
            last_position: position,
        });
    }

    /// Uptime at which the hold is confirmed if the touch stays put.
    pub fn deadline(&self) -> Option<Duration> {
        self.press.map(|press| press.at + self.min_hold)
    }

    /// Last position seen while the press was still within slop.
    pub fn last_position(&self) -> Option<Point> {
        self.press.map(|press| press.last_position)
    }

    /// Feeds a move. A move stamped at or after the deadline confirms the
    /// hold first: the finger was still within slop when the time ran out.
    pub fn update(&mut self, position: Point, at: Duration) -> HoldOutcome {
        let Some(press) = self.press.as_mut() else {
            return HoldOutcome::Pending;
        };
        if at >= press.at + self.min_hold {
            return HoldOutcome::Held;
        }
        if (position - press.position).distance() > self.touch_slop {
            self.press = None;
            return HoldOutcome::Failed(HoldFailure::MovedBeyondSlop);
        }
        press.last_position = position;
        HoldOutcome::Pending
    }

    /// Timer-driven check.
    pub fn check_elapsed(&self, now: Duration) -> HoldOutcome {
        match self.deadline() {
            Some(deadline) if now >= deadline => HoldOutcome::Held,
            _ => HoldOutcome::Pending,
        }
    }

    /// A release before confirmation is always a tap, even if the deadline
    /// timer is merely late.
    pub fn release(&mut self) -> HoldOutcome {
        match self.press.take() {
            Some(_) => HoldOutcome::Failed(HoldFailure::ReleasedEarly),
            None => HoldOutcome::Pending,
        }
    }

    pub fn cancel(&mut self) -> HoldOutcome {
        match self.press.take() {
            Some(_) => HoldOutcome::Failed(HoldFailure::Cancelled),
            None => HoldOutcome::Pending,
        }
    }

    pub fn reset(&mut self) {
        self.press = None;
    }
}
