pub mod dispatcher;
pub mod gestures;
pub mod types;

pub use dispatcher::PointerDispatcher;
pub use types::{PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use super::dispatcher::PointerDispatcher;
    pub use super::types::{PointerEvent, PointerEventKind, PointerId};
}
