//! Runtime configuration for the engine.
//!
//! Defaults come from [`scrolldrag_foundation::gesture_constants`]; hosts
//! override individual fields through the `with_*` builders.

use crate::haptics::ImpactStyle;
use crate::layout::RowLayout;
use scrolldrag_foundation::gesture_constants::{
    DRAG_THRESHOLD, LONG_PRESS_MIN_HOLD, TOUCH_GATE_DELAY,
};
use scrolldrag_ui_graphics::Size;
use std::time::Duration;

pub const DEFAULT_ITEM_COUNT: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Hold required before a touch counts as a press.
    pub min_hold: Duration,
    /// Window the ancestor scroll gets before the gate check runs.
    pub gate_delay: Duration,
    /// Movement that cancels an unconfirmed press, in logical px.
    pub touch_slop: f32,
    pub haptic_style: ImpactStyle,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_hold: LONG_PRESS_MIN_HOLD,
            gate_delay: TOUCH_GATE_DELAY,
            touch_slop: DRAG_THRESHOLD,
            haptic_style: ImpactStyle::default(),
        }
    }
}

impl GestureConfig {
    pub fn with_min_hold(mut self, min_hold: Duration) -> Self {
        self.min_hold = min_hold;
        self
    }

    pub fn with_gate_delay(mut self, gate_delay: Duration) -> Self {
        self.gate_delay = gate_delay;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop.max(0.0);
        self
    }

    pub fn with_haptic_style(mut self, haptic_style: ImpactStyle) -> Self {
        self.haptic_style = haptic_style;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub item_count: usize,
    pub gesture: GestureConfig,
    pub layout: RowLayout,
    /// Visible area of the row; bounds the scroll range.
    pub viewport: Size,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            item_count: DEFAULT_ITEM_COUNT,
            gesture: GestureConfig::default(),
            layout: RowLayout::default(),
            viewport: Size::new(800.0, 632.0),
        }
    }
}

impl EngineConfig {
    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    pub fn with_layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }
}
