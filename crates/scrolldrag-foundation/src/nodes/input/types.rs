use scrolldrag_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform lost or revoked the touch.
    Cancel,
}

/// Touch event with consumption tracking for gesture disambiguation.
///
/// Items see an event before the scroll container that hosts them. A handler
/// that claims the touch consumes the event so handlers later in the chain
/// leave it alone: an armed item consumes its moves so the container does not
/// scroll, and a scrolling container consumes moves so no tap fires.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    /// Uptime on the runtime clock at which the event was produced.
    pub uptime: Duration,
    /// Shared via Rc<Cell> so consumption is visible across copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime: Duration) -> Self {
        Self {
            id: 0,
            kind,
            position,
            uptime,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    /// Mark this event as consumed, preventing later handlers from acting on it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Creates a copy of this event with a new local position, sharing the
    /// consumption state.
    pub fn copy_with_local_position(&self, position: Point) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            position,
            uptime: self.uptime,
            consumed: self.consumed.clone(),
        }
    }
}
