//! End-to-end hold, drag and release sequences on a 30-item row.

use scrolldrag_testing::robot_assertions::{assert_offset_approx_eq, assert_rising_edges};
use scrolldrag_testing::{GestureTestRule, TouchRobot};
use scrolldrag_ui::{GesturePhase, ImpactStyle, Offset};
use std::time::Duration;

const ITEM: usize = 5;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn hold_drag_release(rule: &mut GestureTestRule, dx: f32, dy: f32) {
    TouchRobot::press_item(rule, 1, ITEM)
        .hold_for(ms(150))
        .drag_by(dx, dy, 4)
        .release();
}

#[test]
fn hold_then_drag_commits_offset_and_pulses_once() {
    let mut rule = GestureTestRule::new();
    {
        let mut robot = TouchRobot::press_item(&mut rule, 1, ITEM);
        robot.hold_for(ms(99));
        assert!(!robot.rule().is_pressing(ITEM));
        assert_eq!(robot.rule().haptics().count(), 0);

        robot.hold_for(ms(51));
        assert!(robot.rule().is_pressing(ITEM));
        assert_eq!(robot.rule().haptics().count(), 1, "pulse at the hold mark");

        robot.drag_by(40.0, -10.0, 4);
        let row = robot.rule().row();
        assert_eq!(
            row.handle(ITEM).map(|handle| handle.phase()),
            Some(GesturePhase::Dragging)
        );
        assert_offset_approx_eq(
            row.displayed_offset(ITEM).unwrap_or_default(),
            Offset::new(40.0, -10.0),
            0.01,
            "live delta is displayed",
        );
        assert_eq!(robot.rule().offset(ITEM), Offset::ZERO, "nothing committed yet");
        assert_eq!(robot.rule().haptics().count(), 1, "drag updates never pulse");

        robot.release();
    }

    assert_offset_approx_eq(rule.offset(ITEM), Offset::new(40.0, -10.0), 0.01, "committed");
    assert!(!rule.is_pressing(ITEM));
    assert_eq!(rule.haptics().pulses(), vec![ImpactStyle::Medium]);
    assert_eq!(rule.store().commit_count(), 1);
}

#[test]
fn successive_drags_accumulate() {
    let mut rule = GestureTestRule::new();
    hold_drag_release(&mut rule, 40.0, -10.0);
    hold_drag_release(&mut rule, 10.0, 5.0);

    assert_offset_approx_eq(rule.offset(ITEM), Offset::new(50.0, -5.0), 0.01, "accumulated");
    assert_offset_approx_eq(
        rule.render_state(ITEM).displayed_offset,
        Offset::new(50.0, -5.0),
        0.01,
        "displayed at rest",
    );
    assert_eq!(rule.haptics().count(), 2);
    assert_eq!(rule.store().commit_count(), 2);
}

#[test]
fn release_before_min_hold_is_a_tap() {
    let mut rule = GestureTestRule::new();
    let mut samples = Vec::new();
    {
        let mut robot = TouchRobot::press_item(&mut rule, 1, ITEM);
        for _ in 0..5 {
            robot.hold_for(ms(10));
            samples.push(robot.rule().is_pressing(ITEM));
        }
        robot.release();
    }
    rule.advance_by(ms(300)).expect("runtime settles");
    samples.push(rule.is_pressing(ITEM));

    assert_rising_edges(&samples, 0, "a tap never presses");
    assert_eq!(rule.offset(ITEM), Offset::ZERO);
    assert_eq!(rule.haptics().count(), 0);
    assert_eq!(rule.store().commit_count(), 0);
}

#[test]
fn cancellation_mid_drag_leaves_offset_unchanged() {
    let mut rule = GestureTestRule::new();
    hold_drag_release(&mut rule, 40.0, -10.0);
    {
        let mut robot = TouchRobot::press_item(&mut rule, 1, ITEM);
        robot.hold_for(ms(120)).drag_by(100.0, 0.0, 5);
        assert_offset_approx_eq(
            robot.rule().render_state(ITEM).displayed_offset,
            Offset::new(140.0, -10.0),
            0.01,
            "live delta before cancel",
        );
        robot.cancel();
    }

    assert_offset_approx_eq(rule.offset(ITEM), Offset::new(40.0, -10.0), 0.01, "unchanged");
    assert_offset_approx_eq(
        rule.render_state(ITEM).displayed_offset,
        Offset::new(40.0, -10.0),
        0.01,
        "live delta dropped",
    );
    assert!(!rule.is_pressing(ITEM));
    assert_eq!(rule.store().commit_count(), 1);
}

#[test]
fn long_press_without_movement_commits_nothing() {
    let mut rule = GestureTestRule::new();
    let taps = std::rc::Rc::new(std::cell::Cell::new(0));
    {
        let taps = taps.clone();
        rule.row().set_tap_action(ITEM, move || taps.set(taps.get() + 1));
    }
    TouchRobot::press_item(&mut rule, 1, ITEM)
        .hold_for(ms(400))
        .release();

    assert_eq!(rule.offset(ITEM), Offset::ZERO);
    assert_eq!(rule.store().commit_count(), 0);
    assert!(!rule.is_pressing(ITEM));
    assert_eq!(rule.haptics().count(), 1);
    assert_eq!(taps.get(), 0, "a confirmed press swallows the tap");
}

#[test]
fn press_flag_spans_exactly_the_gesture() {
    let mut rule = GestureTestRule::new();
    let mut samples = vec![rule.is_pressing(ITEM)];
    {
        let mut robot = TouchRobot::press_item(&mut rule, 1, ITEM);
        robot.hold_for(ms(60));
        samples.push(robot.rule().is_pressing(ITEM));
        robot.hold_for(ms(60));
        samples.push(robot.rule().is_pressing(ITEM));
        for _ in 0..4 {
            robot.drag_by(5.0, 0.0, 1);
            samples.push(robot.rule().is_pressing(ITEM));
        }
        robot.release();
    }
    samples.push(rule.is_pressing(ITEM));

    assert_eq!(
        samples,
        vec![false, false, true, true, true, true, true, false]
    );
    assert_rising_edges(&samples, 1, "one press per gesture");
}

#[test]
fn untouched_items_stay_at_rest() {
    let mut rule = GestureTestRule::new();
    hold_drag_release(&mut rule, 40.0, -10.0);

    for (item, state) in rule.row().render_states() {
        if item == ITEM {
            continue;
        }
        assert_eq!(state.displayed_offset, Offset::ZERO, "item {}", item);
        assert!(!state.pressing, "item {}", item);
    }
}

#[test]
fn two_fingers_drag_two_items_independently() {
    let mut rule = GestureTestRule::new();
    let first = rule.item_center(1).expect("item 1");
    let second = rule.item_center(2).expect("item 2");

    rule.touch_down(1, first);
    rule.touch_down(2, second);
    rule.advance_by(ms(150)).expect("runtime settles");
    assert!(rule.is_pressing(1));
    assert!(rule.is_pressing(2));

    rule.touch_move(1, first + Offset::new(0.0, 30.0));
    rule.touch_move(2, second + Offset::new(0.0, -20.0));
    rule.touch_up(1, first + Offset::new(0.0, 30.0));
    rule.touch_up(2, second + Offset::new(0.0, -20.0));
    rule.pump_until_idle().expect("runtime settles");

    assert_eq!(rule.offset(1), Offset::new(0.0, 30.0));
    assert_eq!(rule.offset(2), Offset::new(0.0, -20.0));
    assert_eq!(rule.row().scroll_state().value(), 0.0);
    assert_eq!(rule.haptics().count(), 2);
}

#[test]
fn second_finger_on_same_item_is_ignored() {
    let mut rule = GestureTestRule::new();
    let center = rule.item_center(ITEM).expect("item exists");

    rule.touch_down(1, center);
    rule.advance_by(ms(150)).expect("runtime settles");
    rule.touch_down(2, center);
    rule.touch_move(2, center + Offset::new(80.0, 0.0));
    rule.touch_up(2, center + Offset::new(80.0, 0.0));
    rule.touch_move(1, center + Offset::new(10.0, 0.0));
    rule.touch_up(1, center + Offset::new(10.0, 0.0));
    rule.pump_until_idle().expect("runtime settles");

    assert_eq!(rule.offset(ITEM), Offset::new(10.0, 0.0));
    assert_eq!(rule.haptics().count(), 1);
}
