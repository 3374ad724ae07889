//! Scripted touch gestures for end-to-end row tests.
//!
//! A [`TouchRobot`] drives one pointer through a [`GestureTestRule`],
//! advancing the test clock between steps:
//!
//! ```
//! use scrolldrag_testing::{GestureTestRule, TouchRobot};
//! use std::time::Duration;
//!
//! let mut rule = GestureTestRule::new();
//! TouchRobot::press_item(&mut rule, 1, 5)
//!     .hold_for(Duration::from_millis(150))
//!     .drag_by(40.0, -10.0, 4)
//!     .release();
//! ```
//!
//! Robot steps panic if the runtime fails to settle, as any assertion would.

use crate::testing::GestureTestRule;
use scrolldrag_foundation::PointerId;
use scrolldrag_ui::ItemId;
use scrolldrag_ui_graphics::Point;
use std::time::Duration;

/// Time between consecutive moves of a multi-step drag.
pub const MOVE_INTERVAL: Duration = Duration::from_millis(16);

pub struct TouchRobot<'a> {
    rule: &'a mut GestureTestRule,
    pointer: PointerId,
    position: Point,
    down: bool,
}

impl<'a> TouchRobot<'a> {
    /// Puts `pointer` down at `position`.
    pub fn press_at(rule: &'a mut GestureTestRule, pointer: PointerId, position: Point) -> Self {
        rule.touch_down(pointer, position);
        Self {
            rule,
            pointer,
            position,
            down: true,
        }
    }

    /// Puts `pointer` down on the centre of `item` as currently drawn.
    ///
    /// # Panics
    ///
    /// If `item` is not part of the row.
    pub fn press_item(rule: &'a mut GestureTestRule, pointer: PointerId, item: ItemId) -> Self {
        let position = rule
            .item_center(item)
            .unwrap_or_else(|| panic!("item {} is not in the row", item));
        Self::press_at(rule, pointer, position)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rule(&mut self) -> &mut GestureTestRule {
        self.rule
    }

    /// Keeps the finger still while the clock advances.
    pub fn hold_for(&mut self, duration: Duration) -> &mut Self {
        self.rule
            .advance_by(duration)
            .unwrap_or_else(|err| panic!("hold_for({:?}): {}", duration, err));
        self
    }

    /// Moves by `(dx, dy)` in one event, without advancing the clock.
    pub fn move_by(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.position = Point::new(self.position.x + dx, self.position.y + dy);
        self.rule.touch_move(self.pointer, self.position);
        self
    }

    /// Moves by `(dx, dy)` in `steps` equal moves spaced [`MOVE_INTERVAL`]
    /// apart.
    pub fn drag_by(&mut self, dx: f32, dy: f32, steps: usize) -> &mut Self {
        let steps = steps.max(1);
        let start = self.position;
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let target = Point::new(start.x + dx * t, start.y + dy * t);
            self.hold_for(MOVE_INTERVAL);
            self.rule.touch_move(self.pointer, target);
            self.position = target;
        }
        self
    }

    /// Lifts the finger and settles the runtime.
    pub fn release(&mut self) -> &mut Self {
        if self.down {
            self.down = false;
            self.rule.touch_up(self.pointer, self.position);
            self.settle();
        }
        self
    }

    /// Reports a platform cancellation for the pointer and settles.
    pub fn cancel(&mut self) -> &mut Self {
        if self.down {
            self.down = false;
            self.rule.touch_cancel(self.pointer);
            self.settle();
        }
        self
    }

    fn settle(&mut self) {
        self.rule
            .pump_until_idle()
            .unwrap_or_else(|err| panic!("settling pointer {}: {}", self.pointer, err));
    }
}
