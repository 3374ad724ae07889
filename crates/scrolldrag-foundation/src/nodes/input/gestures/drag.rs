//! Drag detector: reports translation relative to where the drag began.

use scrolldrag_ui_graphics::{Offset, Point};

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct DragDetector {
    origin: Option<Point>,
    translation: Offset,
}

impl DragDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, origin: Point) {
        self.origin = Some(origin);
        self.translation = Offset::ZERO;
    }

    /// Records a new pointer position and returns the translation since start.
    pub fn update(&mut self, position: Point) -> Offset {
        if let Some(origin) = self.origin {
            self.translation = position - origin;
        }
        self.translation
    }

    pub fn translation(&self) -> Offset {
        self.translation
    }

    pub fn reset(&mut self) {
        self.origin = None;
        self.translation = Offset::ZERO;
    }
}
