use scrolldrag_core::{
    DefaultScheduler, Runtime, RuntimeError, TestClock, DEFAULT_MAX_PUMP_TICKS,
};
use scrolldrag_foundation::{PointerEvent, PointerEventKind, PointerId};
use scrolldrag_ui::{
    DragAccumulatorStore, EngineConfig, HapticFeedback, ImpactStyle, ItemId, ItemRenderState,
    ItemRow,
};
use scrolldrag_ui_graphics::{Offset, Point};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// Haptic sink that records every pulse instead of driving hardware.
#[derive(Default)]
pub struct RecordingHaptics {
    pulses: RefCell<Vec<ImpactStyle>>,
    prepared: Cell<usize>,
}

impl RecordingHaptics {
    pub fn pulses(&self) -> Vec<ImpactStyle> {
        self.pulses.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.pulses.borrow().len()
    }

    pub fn prepared(&self) -> usize {
        self.prepared.get()
    }

    pub fn clear(&self) {
        self.pulses.borrow_mut().clear();
        self.prepared.set(0);
    }
}

impl HapticFeedback for RecordingHaptics {
    fn prepare(&self) {
        self.prepared.set(self.prepared.get() + 1);
    }

    fn impact_occurred(&self, style: ImpactStyle) {
        self.pulses.borrow_mut().push(style);
    }
}

/// Headless harness for exercising an [`ItemRow`] in tests.
///
/// Owns a manually advanced clock and the runtime it drives. Time only moves
/// through [`advance_to`](Self::advance_to) and
/// [`advance_by`](Self::advance_by), which fire every timer at its own
/// deadline, in order, and settle the queued work in between.
pub struct GestureTestRule {
    clock: Arc<TestClock>,
    runtime: Runtime,
    row: ItemRow,
    haptics: Rc<RecordingHaptics>,
}

impl GestureTestRule {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let clock = Arc::new(TestClock::new());
        let runtime = Runtime::new(Arc::new(DefaultScheduler), clock.clone());
        let haptics = Rc::new(RecordingHaptics::default());
        let row = ItemRow::new(runtime.handle(), config, haptics.clone());
        Self {
            clock,
            runtime,
            row,
            haptics,
        }
    }

    pub fn row(&self) -> &ItemRow {
        &self.row
    }

    pub fn row_mut(&mut self) -> &mut ItemRow {
        &mut self.row
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn store(&self) -> &DragAccumulatorStore {
        self.row.store()
    }

    pub fn haptics(&self) -> &RecordingHaptics {
        &self.haptics
    }

    pub fn now(&self) -> Duration {
        self.runtime.now()
    }

    /// Runs queued work without moving the clock.
    pub fn pump_until_idle(&mut self) -> Result<usize, RuntimeError> {
        self.runtime.pump_until_idle(DEFAULT_MAX_PUMP_TICKS)
    }

    /// Runs exactly one tick without moving the clock.
    pub fn run_tick(&mut self) -> bool {
        self.runtime.run_tick()
    }

    /// Moves the clock forward to `target`, stopping at each timer deadline
    /// on the way. Never moves the clock backwards.
    pub fn advance_to(&mut self, target: Duration) -> Result<(), RuntimeError> {
        self.pump_until_idle()?;
        while let Some(deadline) = self.runtime.next_deadline() {
            if deadline > target {
                break;
            }
            self.clock.set(deadline);
            self.pump_until_idle()?;
        }
        self.clock.set(target);
        self.pump_until_idle()?;
        Ok(())
    }

    pub fn advance_by(&mut self, by: Duration) -> Result<(), RuntimeError> {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Dispatches one touch event stamped with the current clock. Returns
    /// whether something in the row consumed it.
    pub fn send(&mut self, kind: PointerEventKind, pointer: PointerId, position: Point) -> bool {
        let event = PointerEvent::new(kind, position, self.now()).with_id(pointer);
        self.row.dispatch(&event);
        event.is_consumed()
    }

    pub fn touch_down(&mut self, pointer: PointerId, position: Point) -> bool {
        self.send(PointerEventKind::Down, pointer, position)
    }

    pub fn touch_move(&mut self, pointer: PointerId, position: Point) -> bool {
        self.send(PointerEventKind::Move, pointer, position)
    }

    pub fn touch_up(&mut self, pointer: PointerId, position: Point) -> bool {
        self.send(PointerEventKind::Up, pointer, position)
    }

    pub fn touch_cancel(&mut self, pointer: PointerId) -> bool {
        self.send(PointerEventKind::Cancel, pointer, Point::ZERO)
    }

    /// Centre of the item as currently drawn.
    pub fn item_center(&self, item: ItemId) -> Option<Point> {
        self.row.item_bounds(item).map(|bounds| bounds.center())
    }

    pub fn offset(&self, item: ItemId) -> Offset {
        self.store().offset(item)
    }

    pub fn is_pressing(&self, item: ItemId) -> bool {
        self.store().is_pressing(item)
    }

    pub fn render_state(&self, item: ItemId) -> ItemRenderState {
        self.row.render_state(item).unwrap_or_default()
    }
}

impl Default for GestureTestRule {
    fn default() -> Self {
        Self::new()
    }
}
