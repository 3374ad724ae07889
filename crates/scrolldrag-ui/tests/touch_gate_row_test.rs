//! Touch gate behaviour as seen through a hosted item.

use scrolldrag_testing::GestureTestRule;
use scrolldrag_ui::{GesturePhase, Offset};
use std::time::Duration;

const ITEM: usize = 3;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn closures(rule: &GestureTestRule) -> u64 {
    rule.row()
        .handle(ITEM)
        .map(|handle| handle.gate().closure_count())
        .unwrap_or_default()
}

#[test]
fn superseded_check_is_discarded() {
    let mut rule = GestureTestRule::new();
    let center = rule.item_center(ITEM).expect("item exists");

    // t0 = 0: tap released at 40 ms, t1 = 60 ms.
    rule.touch_down(1, center);
    rule.advance_to(ms(40)).expect("runtime settles");
    rule.touch_up(1, center);
    rule.advance_to(ms(60)).expect("runtime settles");
    rule.touch_down(1, center);

    rule.advance_to(ms(159)).expect("runtime settles");
    assert_eq!(closures(&rule), 0, "the check for t0 was stale");

    rule.advance_to(ms(160)).expect("runtime settles");
    assert_eq!(closures(&rule), 1, "only the check for t1 closes the gate");

    let gate = rule.row().handle(ITEM).map(|handle| handle.gate().clone());
    assert!(gate.is_some_and(|gate| !gate.is_closed()), "reopened a tick later");
}

#[test]
fn rapid_taps_never_leave_the_gate_closed() {
    let mut rule = GestureTestRule::new();
    let center = rule.item_center(ITEM).expect("item exists");
    let taps = std::rc::Rc::new(std::cell::Cell::new(0));
    {
        let taps = taps.clone();
        rule.row()
            .set_tap_action(ITEM, move || taps.set(taps.get() + 1));
    }

    for _ in 0..10 {
        rule.touch_down(1, center);
        rule.advance_by(ms(30)).expect("runtime settles");
        rule.touch_up(1, center);
        rule.advance_by(ms(20)).expect("runtime settles");
    }
    rule.advance_by(ms(500)).expect("runtime settles");

    assert_eq!(taps.get(), 10);
    assert_eq!(closures(&rule), 0);
    assert!(rule
        .row()
        .handle(ITEM)
        .is_some_and(|handle| !handle.gate().is_closed()));
}

#[test]
fn closing_the_gate_keeps_a_recognized_press() {
    let mut rule = GestureTestRule::new();
    let center = rule.item_center(ITEM).expect("item exists");

    rule.touch_down(1, center);
    rule.advance_to(ms(150)).expect("runtime settles");
    assert_eq!(closures(&rule), 1, "held past the delay");

    let phase = rule.row().handle(ITEM).map(|handle| handle.phase());
    assert_eq!(phase, Some(GesturePhase::Pressing));

    rule.touch_move(1, center + Offset::new(25.0, 0.0));
    rule.touch_up(1, center + Offset::new(25.0, 0.0));
    rule.pump_until_idle().expect("runtime settles");
    assert_eq!(rule.offset(ITEM), Offset::new(25.0, 0.0));
    assert!(!rule.is_pressing(ITEM));
}

#[test]
fn gate_is_open_again_after_release() {
    let mut rule = GestureTestRule::new();
    let center = rule.item_center(ITEM).expect("item exists");

    rule.touch_down(1, center);
    rule.advance_to(ms(150)).expect("runtime settles");
    rule.touch_up(1, center);
    rule.pump_until_idle().expect("runtime settles");

    let state = rule
        .row()
        .handle(ITEM)
        .map(|handle| handle.gate().state())
        .unwrap_or_default();
    assert_eq!(state.last_touch_down, None);
    assert!(!state.closed);
}
