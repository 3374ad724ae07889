//! Shared gesture constants for consistent touch handling.
//!
//! The slop is shared between the item press recognizer, the tap gate and the
//! scroll detector so that a touch cannot be both "still a press" for an item
//! and "already a scroll" for the container.

use std::time::Duration;

/// Touch slop in logical pixels.
///
/// If the pointer moves more than this distance from the initial press
/// position before a press is confirmed:
/// - the item's press-hold recognizer fails (the touch is left to the scroll)
/// - tap actions are not fired on release
///
/// Matches common platform conventions (Android uses ~8dp for
/// ViewConfiguration.TOUCH_SLOP).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Minimum continuous hold before an item press is confirmed.
pub const LONG_PRESS_MIN_HOLD: Duration = Duration::from_millis(100);

/// Delay after touch-down before the tap gate closes for one tick.
pub const TOUCH_GATE_DELAY: Duration = Duration::from_millis(100);
