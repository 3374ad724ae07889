//! Haptic feedback dispatch.
//!
//! The dispatcher listens to the store's press edges and forwards one pulse
//! per edge to the platform's [`HapticFeedback`] on the following tick, so
//! slow feedback hardware never stalls gesture recognition.

use crate::drag_store::{DragAccumulatorStore, ItemId, ObserverId};
use scrolldrag_core::RuntimeHandle;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImpactStyle {
    Light,
    #[default]
    Medium,
    Heavy,
}

/// Platform trigger for a single discrete haptic pulse.
pub trait HapticFeedback {
    /// Warm up the actuator ahead of a pulse.
    fn prepare(&self) {}

    fn impact_occurred(&self, style: ImpactStyle);
}

/// Feedback sink for hosts without haptic hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHaptics;

impl HapticFeedback for LogHaptics {
    fn impact_occurred(&self, style: ImpactStyle) {
        log::info!("haptic impact ({:?})", style);
    }
}

#[derive(Clone)]
pub struct HapticDispatcher {
    runtime: RuntimeHandle,
    feedback: Rc<dyn HapticFeedback>,
    style: ImpactStyle,
}

impl HapticDispatcher {
    pub fn new(
        runtime: RuntimeHandle,
        feedback: Rc<dyn HapticFeedback>,
        style: ImpactStyle,
    ) -> Self {
        Self {
            runtime,
            feedback,
            style,
        }
    }

    /// Schedules exactly one pulse for a press confirmation of `item`.
    pub fn dispatch(&self, item: ItemId) {
        let feedback = self.feedback.clone();
        let style = self.style;
        self.runtime.enqueue_ui_task(move || {
            log::debug!("haptic pulse for item {}", item);
            feedback.prepare();
            feedback.impact_occurred(style);
        });
    }

    /// Subscribes to the store's press edges. Remove the returned observer to
    /// detach.
    pub fn attach(&self, store: &DragAccumulatorStore) -> ObserverId {
        let dispatcher = self.clone();
        store.add_press_observer(move |item| dispatcher.dispatch(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrolldrag_core::{DefaultScheduler, Runtime, TestClock};
    use std::cell::RefCell;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        pulses: RefCell<Vec<ImpactStyle>>,
    }

    impl HapticFeedback for Recorder {
        fn impact_occurred(&self, style: ImpactStyle) {
            self.pulses.borrow_mut().push(style);
        }
    }

    #[test]
    fn pulse_is_deferred_to_next_tick() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler), Arc::new(TestClock::new()));
        let recorder = Rc::new(Recorder::default());
        let dispatcher =
            HapticDispatcher::new(runtime.handle(), recorder.clone(), ImpactStyle::Heavy);
        let store = DragAccumulatorStore::new();
        dispatcher.attach(&store);

        store.set_pressing(1, true);
        assert!(recorder.pulses.borrow().is_empty(), "never inside the edge callback");

        runtime.run_tick();
        assert_eq!(*recorder.pulses.borrow(), vec![ImpactStyle::Heavy]);
    }

    #[test]
    fn holds_and_releases_do_not_pulse() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler), Arc::new(TestClock::new()));
        let recorder = Rc::new(Recorder::default());
        let dispatcher =
            HapticDispatcher::new(runtime.handle(), recorder.clone(), ImpactStyle::default());
        let store = DragAccumulatorStore::new();
        let observer = dispatcher.attach(&store);

        store.set_pressing(1, true);
        store.set_pressing(1, true);
        store.set_pressing(1, false);
        runtime.pump_until_idle(10).expect("settles");
        assert_eq!(*recorder.pulses.borrow(), vec![ImpactStyle::Medium]);

        store.remove_press_observer(observer);
        store.set_pressing(1, true);
        runtime.pump_until_idle(10).expect("settles");
        assert_eq!(recorder.pulses.borrow().len(), 1);
    }
}
