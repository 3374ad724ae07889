//! Geometry of a horizontal row of fixed-size item slots.

use crate::drag_store::ItemId;
use scrolldrag_ui_graphics::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    /// Size of the slot each item occupies.
    pub slot_size: Size,
    /// Size of the visible (and touchable) content, centred in its slot.
    pub content_size: Size,
    /// Padding before the first slot and between neighbouring slots.
    pub padding: f32,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            slot_size: Size::new(200.0, 600.0),
            content_size: Size::new(100.0, 100.0),
            padding: 16.0,
        }
    }
}

impl RowLayout {
    pub fn with_slot_size(mut self, slot_size: Size) -> Self {
        self.slot_size = slot_size;
        self
    }

    pub fn with_content_size(mut self, content_size: Size) -> Self {
        self.content_size = content_size;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn slot_stride(&self) -> f32 {
        self.slot_size.width + self.padding
    }

    /// Slot rectangle in content coordinates (unscrolled).
    pub fn slot_rect(&self, item: ItemId) -> Rect {
        let origin = Point::new(
            self.padding + item as f32 * self.slot_stride(),
            self.padding,
        );
        Rect::from_origin_size(origin, self.slot_size)
    }

    /// Content rectangle of `item` at rest, in content coordinates.
    pub fn content_rect(&self, item: ItemId) -> Rect {
        let slot = self.slot_rect(item);
        let center = slot.center();
        let origin = Point::new(
            center.x - self.content_size.width / 2.0,
            center.y - self.content_size.height / 2.0,
        );
        Rect::from_origin_size(origin, self.content_size)
    }

    /// Total width of a row of `count` items, including outer padding.
    pub fn content_width(&self, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        self.padding + count as f32 * self.slot_stride()
    }

    pub fn max_scroll(&self, count: usize, viewport_width: f32) -> f32 {
        (self.content_width(count) - viewport_width).max(0.0)
    }
}
