//! Item-level wiring for the scrolldrag engine: the drag accumulator store,
//! haptic dispatch, per-item gesture handles and the scrolling row that hosts
//! them.

pub mod config;
pub mod drag_store;
pub mod haptics;
pub mod item_collection;
pub mod item_gesture;
pub mod item_row;
pub mod layout;

pub use config::{EngineConfig, GestureConfig};
pub use drag_store::{DragAccumulatorStore, ItemDragState, ItemId, ObserverId};
pub use haptics::{HapticDispatcher, HapticFeedback, ImpactStyle, LogHaptics};
pub use item_collection::ItemCollection;
pub use item_gesture::{ItemGestureHandle, ItemRenderState};
pub use item_row::ItemRow;
pub use layout::RowLayout;

pub use scrolldrag_foundation::{GesturePhase, PointerEvent, PointerEventKind, PointerId};
pub use scrolldrag_ui_graphics::{Offset, Point, Rect, Size};

pub mod prelude {
    pub use crate::config::{EngineConfig, GestureConfig};
    pub use crate::drag_store::{DragAccumulatorStore, ItemId};
    pub use crate::haptics::{HapticDispatcher, HapticFeedback, ImpactStyle};
    pub use crate::item_gesture::ItemRenderState;
    pub use crate::item_row::ItemRow;
    pub use scrolldrag_ui_graphics::prelude::*;
}
