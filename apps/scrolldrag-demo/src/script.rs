use anyhow::Context;
use scrolldrag_core::Runtime;
use scrolldrag_ui::{ItemId, ItemRow, Offset, Point, PointerEvent, PointerEventKind};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(8);
const DRAG_STEPS: usize = 8;
const POINTER: u64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEnd {
    Release,
    Cancel,
}

/// One scripted touch: down on an item, hold still, optionally drag, end.
#[derive(Clone, Copy, Debug)]
pub struct Gesture {
    item: ItemId,
    hold: Duration,
    drag: Option<Offset>,
    end: GestureEnd,
}

impl Gesture {
    pub fn on_item(item: ItemId) -> Self {
        Self {
            item,
            hold: Duration::ZERO,
            drag: None,
            end: GestureEnd::Release,
        }
    }

    pub fn hold_ms(mut self, millis: u64) -> Self {
        self.hold = Duration::from_millis(millis);
        self
    }

    pub fn drag(mut self, dx: f32, dy: f32) -> Self {
        self.drag = Some(Offset::new(dx, dy));
        self
    }

    pub fn ending(mut self, end: GestureEnd) -> Self {
        self.end = end;
        self
    }
}

/// Feeds gestures to a row in real time, ticking the runtime once per frame.
pub struct Player<'a> {
    runtime: &'a Runtime,
}

impl<'a> Player<'a> {
    pub fn new(runtime: &'a Runtime) -> Self {
        Self { runtime }
    }

    pub fn play(&mut self, row: &mut ItemRow, gesture: &Gesture) -> anyhow::Result<()> {
        let start = row
            .item_bounds(gesture.item)
            .with_context(|| format!("item {} is not in the row", gesture.item))?
            .center();

        self.send(row, PointerEventKind::Down, start);
        self.wait(gesture.hold);

        let mut position = start;
        if let Some(drag) = gesture.drag {
            for step in 1..=DRAG_STEPS {
                let t = step as f32 / DRAG_STEPS as f32;
                position = Point::new(start.x + drag.x * t, start.y + drag.y * t);
                self.wait(FRAME);
                self.send(row, PointerEventKind::Move, position);
            }
        }

        let kind = match gesture.end {
            GestureEnd::Release => PointerEventKind::Up,
            GestureEnd::Cancel => PointerEventKind::Cancel,
        };
        self.send(row, kind, position);
        if let Some(state) = row.render_state(gesture.item) {
            log::info!(
                "item {} after {:?}: offset ({:.1}, {:.1}), pressing {}",
                gesture.item,
                gesture.end,
                state.displayed_offset.x,
                state.displayed_offset.y,
                state.pressing
            );
        }
        Ok(())
    }

    fn send(&self, row: &mut ItemRow, kind: PointerEventKind, position: Point) {
        row.enqueue(PointerEvent::new(kind, position, self.runtime.now()).with_id(POINTER));
        row.dispatch_pending();
    }

    /// Runs frames until `duration` of wall time has passed.
    fn wait(&self, duration: Duration) {
        let deadline = self.runtime.now() + duration;
        loop {
            self.runtime.run_tick();
            let now = self.runtime.now();
            if now >= deadline {
                break;
            }
            std::thread::sleep(FRAME.min(deadline - now));
        }
        self.runtime.run_tick();
    }
}
