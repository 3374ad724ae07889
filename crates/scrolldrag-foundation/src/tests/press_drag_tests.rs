use super::touch;
use crate::nodes::input::gestures::{
    GesturePhase, GestureSignal, HoldFailure, PressDragRecognizer,
};
use crate::nodes::input::types::PointerEventKind::{Cancel, Down, Move, Up};
use scrolldrag_ui_graphics::Offset;
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn hold_then_drag_then_release_commits_drag_delta() {
    let mut recognizer = PressDragRecognizer::default();

    assert!(recognizer.on_pointer_event(&touch(Down, 100.0, 100.0, 0)).is_empty());
    let generation = recognizer.generation();
    assert_eq!(recognizer.pending_hold_deadline(), Some(ms(100)));
    assert_eq!(recognizer.phase(), GesturePhase::Idle);

    assert_eq!(recognizer.on_hold_deadline(generation, ms(99)), None);
    assert_eq!(
        recognizer.on_hold_deadline(generation, ms(100)),
        Some(GestureSignal::Armed)
    );
    assert_eq!(recognizer.phase(), GesturePhase::Pressing);
    assert_eq!(recognizer.pending_hold_deadline(), None);

    let first = touch(Move, 120.0, 95.0, 150);
    let signals = recognizer.on_pointer_event(&first);
    assert_eq!(
        signals.as_slice(),
        &[GestureSignal::DragStarted(Offset::new(20.0, -5.0))]
    );
    assert!(first.is_consumed(), "armed item owns its moves");

    let signals = recognizer.on_pointer_event(&touch(Move, 140.0, 90.0, 170));
    assert_eq!(
        signals.as_slice(),
        &[GestureSignal::DragMoved(Offset::new(40.0, -10.0))]
    );
    assert_eq!(recognizer.live_delta(), Offset::new(40.0, -10.0));

    let up = touch(Up, 140.0, 90.0, 200);
    let signals = recognizer.on_pointer_event(&up);
    assert_eq!(
        signals.as_slice(),
        &[GestureSignal::Committed(Offset::new(40.0, -10.0))]
    );
    assert!(up.is_consumed());
    assert_eq!(recognizer.phase(), GesturePhase::Idle);
    assert_eq!(recognizer.live_delta(), Offset::ZERO);
    assert!(!recognizer.is_tracking());
}

#[test]
fn drag_delta_is_measured_from_arming_position() {
    let mut recognizer = PressDragRecognizer::default();
    recognizer.on_pointer_event(&touch(Down, 100.0, 100.0, 0));
    // Jitter inside the slop before the hold is confirmed.
    recognizer.on_pointer_event(&touch(Move, 104.0, 103.0, 40));
    let generation = recognizer.generation();
    recognizer.on_hold_deadline(generation, ms(100));

    let signals = recognizer.on_pointer_event(&touch(Move, 114.0, 103.0, 120));
    assert_eq!(
        signals.as_slice(),
        &[GestureSignal::DragStarted(Offset::new(10.0, 0.0))]
    );
}

#[test]
fn late_move_arms_before_dragging() {
    let mut recognizer = PressDragRecognizer::default();
    recognizer.on_pointer_event(&touch(Down, 100.0, 100.0, 0));

    // The hold timer has not run yet but the move is stamped after the deadline.
    let signals = recognizer.on_pointer_event(&touch(Move, 130.0, 100.0, 130));
    assert_eq!(
        signals.as_slice(),
        &[
            GestureSignal::Armed,
            GestureSignal::DragStarted(Offset::new(30.0, 0.0))
        ]
    );

    // The timer arriving afterwards is a no-op.
    let generation = recognizer.generation();
    assert_eq!(recognizer.on_hold_deadline(generation, ms(130)), None);
}

#[test]
fn release_without_drag_commits_zero() {
    let mut recognizer = PressDragRecognizer::default();
    recognizer.on_pointer_event(&touch(Down, 10.0, 10.0, 0));
    let generation = recognizer.generation();
    recognizer.on_hold_deadline(generation, ms(100));

    let signals = recognizer.on_pointer_event(&touch(Up, 10.0, 10.0, 300));
    assert_eq!(signals.as_slice(), &[GestureSignal::Committed(Offset::ZERO)]);
}

#[test]
fn quick_tap_is_rejected_and_never_arms() {
    let mut recognizer = PressDragRecognizer::default();
    recognizer.on_pointer_event(&touch(Down, 10.0, 10.0, 0));
    let generation = recognizer.generation();

    let up = touch(Up, 10.0, 10.0, 50);
    let signals = recognizer.on_pointer_event(&up);
    assert_eq!(
        signals.as_slice(),
        &[GestureSignal::Rejected(HoldFailure::ReleasedEarly)]
    );
    assert!(!up.is_consumed(), "taps stay available to the surface");

    // The hold timer for the finished gesture fires later and must be ignored.
    assert_eq!(recognizer.on_hold_deadline(generation, ms(100)), None);
    assert_eq!(recognizer.phase(), GesturePhase::Idle);
}

#[test]
fn moving_beyond_slop_before_hold_rejects() {
    let mut recognizer = PressDragRecognizer::default();
    recognizer.on_pointer_event(&touch(Down, 100.0, 100.0, 0));
    let generation = recognizer.generation();

    let moved = touch(Move, 80.0, 100.0, 30);
    let signals = recognizer.on_pointer_event(&moved);
    assert_eq!(
        signals.as_slice(),
        &[GestureSignal::Rejected(HoldFailure::MovedBeyondSlop)]
    );
    assert!(!moved.is_consumed(), "the scroll container may claim it");
    assert_eq!(recognizer.on_hold_deadline(generation, ms(100)), None);
    assert!(recognizer.on_pointer_event(&touch(Up, 80.0, 100.0, 60)).is_empty());
}

#[test]
fn cancel_mid_drag_never_commits() {
    let mut recognizer = PressDragRecognizer::default();
    recognizer.on_pointer_event(&touch(Down, 0.0, 0.0, 0));
    let generation = recognizer.generation();
    recognizer.on_hold_deadline(generation, ms(100));
    recognizer.on_pointer_event(&touch(Move, 100.0, 0.0, 150));
    assert_eq!(recognizer.live_delta(), Offset::new(100.0, 0.0));

    let signals = recognizer.on_pointer_event(&touch(Cancel, 100.0, 0.0, 160));
    assert_eq!(signals.as_slice(), &[GestureSignal::Cancelled]);
    assert_eq!(recognizer.live_delta(), Offset::ZERO);
    assert_eq!(recognizer.phase(), GesturePhase::Idle);
}

#[test]
fn move_claimed_by_another_handler_cancels_armed_press() {
    let mut recognizer = PressDragRecognizer::default();
    recognizer.on_pointer_event(&touch(Down, 0.0, 0.0, 0));
    let generation = recognizer.generation();
    recognizer.on_hold_deadline(generation, ms(100));

    let stolen = touch(Move, 5.0, 0.0, 120);
    stolen.consume();
    assert_eq!(
        recognizer.on_pointer_event(&stolen).as_slice(),
        &[GestureSignal::Cancelled]
    );
}

#[test]
fn second_pointer_is_ignored_while_tracking() {
    let mut recognizer = PressDragRecognizer::default();
    recognizer.on_pointer_event(&touch(Down, 0.0, 0.0, 0));
    let generation = recognizer.generation();

    let other = touch(Down, 50.0, 50.0, 10).with_id(2);
    assert!(recognizer.on_pointer_event(&other).is_empty());
    assert_eq!(recognizer.generation(), generation);
    assert!(recognizer
        .on_pointer_event(&touch(Up, 50.0, 50.0, 20).with_id(2))
        .is_empty());
    assert_eq!(recognizer.pointer(), Some(1));
}

#[test]
fn each_touch_down_starts_a_new_generation() {
    let mut recognizer = PressDragRecognizer::new(ms(100), 8.0);
    recognizer.on_pointer_event(&touch(Down, 0.0, 0.0, 0));
    let first = recognizer.generation();
    recognizer.on_pointer_event(&touch(Up, 0.0, 0.0, 20));
    recognizer.on_pointer_event(&touch(Down, 0.0, 0.0, 40));
    let second = recognizer.generation();
    assert_ne!(first, second);

    // The first touch's timer is stale even though the second touch is down.
    assert_eq!(recognizer.on_hold_deadline(first, ms(100)), None);
    assert_eq!(recognizer.on_hold_deadline(second, ms(139)), None);
    assert_eq!(
        recognizer.on_hold_deadline(second, ms(140)),
        Some(GestureSignal::Armed)
    );
}
