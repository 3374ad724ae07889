//! Foundation elements for scrolldrag: pointer input, gesture recognition,
//! touch gating and the scroll container detector.

pub mod gesture_constants;
pub mod nodes;
pub mod scrollable;
pub mod touch_gate;

#[cfg(test)]
mod tests;

pub use nodes::input::gestures::{
    DragDetector, GesturePhase, GestureSignal, GestureSignals, HoldFailure, HoldOutcome,
    PressDragRecognizer, PressHoldDetector,
};
pub use nodes::input::{PointerDispatcher, PointerEvent, PointerEventKind, PointerId};
pub use scrollable::{Orientation, ScrollGestureDetector, ScrollState, ScrollableState};
pub use touch_gate::{GateState, TouchGate, TouchStamp};

pub mod prelude {
    pub use crate::gesture_constants::*;
    pub use crate::nodes::input::gestures::{GesturePhase, GestureSignal, PressDragRecognizer};
    pub use crate::nodes::input::prelude::*;
    pub use crate::scrollable::*;
    pub use crate::touch_gate::{GateState, TouchGate};
}
