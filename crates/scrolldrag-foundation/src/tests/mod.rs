mod press_drag_tests;

use crate::nodes::input::types::{PointerEvent, PointerEventKind};
use scrolldrag_ui_graphics::Point;
use std::time::Duration;

pub(crate) fn touch(kind: PointerEventKind, x: f32, y: f32, at_ms: u64) -> PointerEvent {
    PointerEvent::new(kind, Point::new(x, y), Duration::from_millis(at_ms)).with_id(1)
}
