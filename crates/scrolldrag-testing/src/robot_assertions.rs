//! Assertion utilities for gesture tests.

use scrolldrag_ui_graphics::{Offset, Rect};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that an offset is approximately equal to another.
pub fn assert_offset_approx_eq(actual: Offset, expected: Offset, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that a rectangle contains a point.
pub fn assert_rect_contains_point(rect: Rect, x: f32, y: f32, msg: &str) {
    assert!(
        rect.contains(x, y),
        "{}: point ({}, {}) not in rect {:?}",
        msg,
        x,
        y,
        rect
    );
}

/// Assert that a sequence of press flags has exactly `expected` rising edges.
pub fn assert_rising_edges(samples: &[bool], expected: usize, msg: &str) {
    let edges = samples
        .windows(2)
        .filter(|pair| !pair[0] && pair[1])
        .count()
        + usize::from(samples.first().copied().unwrap_or(false));
    assert_eq!(
        edges, expected,
        "{}: expected {} press edge(s) in {:?}",
        msg, expected, samples
    );
}
