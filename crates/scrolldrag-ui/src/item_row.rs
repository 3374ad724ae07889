//! Horizontal scrolling row hosting one gesture handle per item.
//!
//! Events are routed child first: the item under a pointer sees the event
//! before the row's scroll detector, so an armed or dragging item consumes its
//! moves and the row never scrolls underneath it. When the scroll detector
//! claims a touch instead, the captured item's gesture is cancelled.

use crate::config::EngineConfig;
use crate::drag_store::{DragAccumulatorStore, ItemId, ObserverId};
use crate::haptics::{HapticDispatcher, HapticFeedback};
use crate::item_collection::ItemCollection;
use crate::item_gesture::{ItemGestureHandle, ItemRenderState};
use indexmap::IndexMap;
use scrolldrag_core::RuntimeHandle;
use scrolldrag_foundation::{
    Orientation, PointerDispatcher, PointerEvent, PointerEventKind, PointerId,
    ScrollGestureDetector, ScrollState,
};
use scrolldrag_ui_graphics::{Offset, Point, Rect};
use std::rc::Rc;

pub struct ItemRow {
    config: EngineConfig,
    items: ItemCollection,
    store: DragAccumulatorStore,
    handles: Vec<ItemGestureHandle>,
    scroll_state: ScrollState,
    scroll: ScrollGestureDetector,
    // Item each live pointer went down on; `None` for touches on empty space.
    captures: IndexMap<PointerId, Option<ItemId>>,
    pending: PointerDispatcher,
    haptics: HapticDispatcher,
    press_observer: ObserverId,
}

impl ItemRow {
    pub fn new(
        runtime: RuntimeHandle,
        config: EngineConfig,
        feedback: Rc<dyn HapticFeedback>,
    ) -> Self {
        let items = ItemCollection::new(config.item_count);
        let store = DragAccumulatorStore::with_capacity(items.len());
        let handles = items
            .ids()
            .map(|item| {
                ItemGestureHandle::new(item, store.clone(), runtime.clone(), &config.gesture)
            })
            .collect();

        let scroll_state = ScrollState::default();
        scroll_state.set_max_value(config.layout.max_scroll(items.len(), config.viewport.width));
        let scroll = ScrollGestureDetector::new(
            Rc::new(scroll_state.clone()),
            Orientation::Horizontal,
            true,
        )
        .with_touch_slop(config.gesture.touch_slop);

        let haptics = HapticDispatcher::new(runtime, feedback, config.gesture.haptic_style);
        let press_observer = haptics.attach(&store);

        Self {
            config,
            items,
            store,
            handles,
            scroll_state,
            scroll,
            captures: IndexMap::new(),
            pending: PointerDispatcher::new(),
            haptics,
            press_observer,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn items(&self) -> ItemCollection {
        self.items
    }

    pub fn store(&self) -> &DragAccumulatorStore {
        &self.store
    }

    pub fn haptics(&self) -> &HapticDispatcher {
        &self.haptics
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll_state
    }

    pub fn handle(&self, item: ItemId) -> Option<&ItemGestureHandle> {
        let handle = self.handles.get(item);
        if handle.is_none() {
            log::warn!("item {} out of range (row has {})", item, self.items.len());
        }
        handle
    }

    /// Item currently captured by `pointer`, if any.
    pub fn captured_item(&self, pointer: PointerId) -> Option<ItemId> {
        self.captures.get(&pointer).copied().flatten()
    }

    /// Where `item` is drawn: its content rect, scrolled and displaced by its
    /// displayed offset.
    pub fn item_bounds(&self, item: ItemId) -> Option<Rect> {
        let handle = self.handle(item)?;
        Some(
            self.config
                .layout
                .content_rect(item)
                .translate(-self.scroll_state.value(), 0.0)
                .offset_by(handle.displayed_offset()),
        )
    }

    /// Topmost item drawn under `position`. Later items paint over earlier
    /// ones, so they win.
    pub fn hit_test(&self, position: Point) -> Option<ItemId> {
        self.items.ids().rev().find(|&item| {
            self.item_bounds(item)
                .is_some_and(|bounds| bounds.contains_point(position))
        })
    }

    /// Queues an event for the next [`dispatch_pending`](Self::dispatch_pending).
    pub fn enqueue(&mut self, event: PointerEvent) {
        self.pending.push(event);
    }

    pub fn dispatch_pending(&mut self) -> usize {
        let mut pending = std::mem::take(&mut self.pending);
        let mut dispatched = 0;
        pending.drain(|_, event| {
            self.dispatch(&event);
            dispatched += 1;
        });
        dispatched
    }

    /// Routes one event to the captured item, then to the row's scroll.
    pub fn dispatch(&mut self, event: &PointerEvent) {
        let target = match event.kind {
            PointerEventKind::Down => {
                let target = self.hit_test(event.position);
                if self.captures.insert(event.id, target).is_some() {
                    log::warn!("pointer {} went down twice without lifting", event.id);
                }
                log::trace!("pointer {} down on {:?}", event.id, target);
                target
            }
            _ => match self.captures.get(&event.id) {
                Some(target) => *target,
                None => {
                    log::warn!("{:?} for unknown pointer {} ignored", event.kind, event.id);
                    return;
                }
            },
        };

        if let Some(item) = target {
            let local = self.to_item_local(item, event);
            self.handles[item].on_pointer_event(&local);
        }

        let was_scrolling = self.scroll.is_scrolling();
        self.scroll.on_pointer_event(event);
        if !was_scrolling && self.scroll.is_scrolling() {
            if let Some(item) = target {
                log::debug!("row scroll claimed pointer {} from item {}", event.id, item);
                self.handles[item].cancel();
            }
        }

        if matches!(event.kind, PointerEventKind::Up | PointerEventKind::Cancel) {
            self.captures.shift_remove(&event.id);
        }
    }

    /// Cancels every touch in flight, as when the host window loses focus.
    pub fn cancel_all(&mut self) {
        let pointers: Vec<PointerId> = self.captures.keys().copied().collect();
        for pointer in pointers {
            let event =
                PointerEvent::new(PointerEventKind::Cancel, Point::ZERO, Default::default())
                    .with_id(pointer);
            self.dispatch(&event);
        }
    }

    pub fn displayed_offset(&self, item: ItemId) -> Option<Offset> {
        self.handle(item).map(ItemGestureHandle::displayed_offset)
    }

    pub fn is_pressing(&self, item: ItemId) -> Option<bool> {
        self.handle(item).map(ItemGestureHandle::is_pressing)
    }

    pub fn render_state(&self, item: ItemId) -> Option<ItemRenderState> {
        self.handle(item).map(ItemGestureHandle::render_state)
    }

    /// The `(DisplayedOffset, PressState)` pair of every item, in order.
    pub fn render_states(&self) -> impl Iterator<Item = (ItemId, ItemRenderState)> + '_ {
        self.handles
            .iter()
            .map(|handle| (handle.item(), handle.render_state()))
    }

    pub fn set_tap_action(&self, item: ItemId, action: impl Fn() + 'static) -> bool {
        match self.handle(item) {
            Some(handle) => {
                handle.set_tap_action(action);
                true
            }
            None => false,
        }
    }

    // Item handles see positions relative to their slot in unscrolled
    // content space.
    fn to_item_local(&self, item: ItemId, event: &PointerEvent) -> PointerEvent {
        let slot = self.config.layout.slot_rect(item);
        let local = Point::new(
            event.position.x + self.scroll_state.value() - slot.x,
            event.position.y - slot.y,
        );
        event.copy_with_local_position(local)
    }
}

impl Drop for ItemRow {
    fn drop(&mut self) {
        self.store.remove_press_observer(self.press_observer);
    }
}
