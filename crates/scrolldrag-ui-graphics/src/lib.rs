//! Pure math for the scrolldrag touch engine
//!
//! Geometry primitives shared by the pointer input, gesture and layout
//! layers. Positions are `Point`s, displacements are `Offset`s.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Offset, Point, Rect, Size};
}
