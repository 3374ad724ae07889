//! Pointer input queue.
//!
//! Platform integrations push raw touch events as they arrive; the host
//! drains them once per frame in arrival order.

use super::types::{PointerEvent, PointerId};
use smallvec::SmallVec;

#[derive(Default)]
pub struct PointerDispatcher {
    queue: SmallVec<[(PointerId, PointerEvent); 8]>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self {
            queue: SmallVec::new(),
        }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push((event.id, event));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain<F>(&mut self, mut handler: F)
    where
        F: FnMut(PointerId, PointerEvent),
    {
        for (id, event) in self.queue.drain(..) {
            handler(id, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::input::types::PointerEventKind;
    use scrolldrag_ui_graphics::Point;
    use std::time::Duration;

    #[test]
    fn drains_in_arrival_order() {
        let mut dispatcher = PointerDispatcher::new();
        dispatcher.push(
            PointerEvent::new(PointerEventKind::Down, Point::ZERO, Duration::ZERO).with_id(3),
        );
        dispatcher.push(
            PointerEvent::new(PointerEventKind::Up, Point::ZERO, Duration::from_millis(5))
                .with_id(3),
        );
        assert_eq!(dispatcher.len(), 2);

        let mut kinds = Vec::new();
        dispatcher.drain(|id, event| kinds.push((id, event.kind)));
        assert_eq!(
            kinds,
            vec![(3, PointerEventKind::Down), (3, PointerEventKind::Up)]
        );
        assert!(dispatcher.is_empty());
    }
}
