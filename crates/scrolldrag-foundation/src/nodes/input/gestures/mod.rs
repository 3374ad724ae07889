pub mod drag;
pub mod press_drag;
pub mod press_hold;

pub use drag::DragDetector;
pub use press_drag::{GesturePhase, GestureSignal, GestureSignals, PressDragRecognizer};
pub use press_hold::{HoldFailure, HoldOutcome, PressHoldDetector};
