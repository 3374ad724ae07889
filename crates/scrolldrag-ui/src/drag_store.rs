//! Session-scoped store of accumulated item offsets and press flags.
//!
//! The store is the single source of truth the renderer reads from and the
//! only state shared between gesture handles. All mutation goes through
//! [`DragAccumulatorStore::commit`] and [`DragAccumulatorStore::set_pressing`].

use rustc_hash::FxHashMap;
use scrolldrag_ui_graphics::Offset;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Dense index of an item in its row, `0..N`.
pub type ItemId = usize;

/// Ids below this (or below the capacity the store was built with) live in a
/// dense vector. Larger ids fall back to a hash map so a stray id never grows
/// the vector unbounded.
const DENSE_ITEM_LIMIT: usize = 1024;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemDragState {
    pub offset: Offset,
    pub pressing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type PressObserver = Rc<dyn Fn(ItemId)>;

struct StoreInner {
    // Indexed by ItemId below `dense_limit`, grown on first mutation. Reads
    // of ids never mutated see the default state.
    cells: RefCell<Vec<ItemDragState>>,
    sparse: RefCell<FxHashMap<ItemId, ItemDragState>>,
    dense_limit: usize,
    press_observers: RefCell<FxHashMap<u64, PressObserver>>,
    next_observer_id: Cell<u64>,
    commits: Cell<u64>,
}

#[derive(Clone)]
pub struct DragAccumulatorStore {
    inner: Rc<StoreInner>,
}

impl DragAccumulatorStore {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(items: usize) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                cells: RefCell::new(Vec::with_capacity(items)),
                sparse: RefCell::new(FxHashMap::default()),
                dense_limit: items.max(DENSE_ITEM_LIMIT),
                press_observers: RefCell::new(FxHashMap::default()),
                next_observer_id: Cell::new(1),
                commits: Cell::new(0),
            }),
        }
    }

    pub fn get(&self, item: ItemId) -> ItemDragState {
        let dense = self.inner.cells.borrow().get(item).copied();
        dense
            .or_else(|| self.inner.sparse.borrow().get(&item).copied())
            .unwrap_or_default()
    }

    /// Accumulated offset, zero if the item was never dragged.
    pub fn offset(&self, item: ItemId) -> Offset {
        self.get(item).offset
    }

    pub fn is_pressing(&self, item: ItemId) -> bool {
        self.get(item).pressing
    }

    /// Adds `delta` to the item's accumulated offset.
    pub fn commit(&self, item: ItemId, delta: Offset) {
        let total = self.with_cell(item, |cell| {
            cell.offset += delta;
            cell.offset
        });
        self.inner.commits.set(self.inner.commits.get() + 1);
        log::debug!(
            "item {} committed ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            item,
            delta.x,
            delta.y,
            total.x,
            total.y
        );
    }

    /// Sets the press flag. Observers run synchronously, and only on the
    /// false→true edge.
    pub fn set_pressing(&self, item: ItemId, pressing: bool) {
        let was_pressing =
            self.with_cell(item, |cell| std::mem::replace(&mut cell.pressing, pressing));
        if pressing && !was_pressing {
            log::trace!("item {} pressed", item);
            self.notify_pressed(item);
        } else if !pressing && was_pressing {
            log::trace!("item {} released", item);
        }
    }

    pub fn add_press_observer(&self, observer: impl Fn(ItemId) + 'static) -> ObserverId {
        let id = self.inner.next_observer_id.get();
        self.inner.next_observer_id.set(id + 1);
        self.inner
            .press_observers
            .borrow_mut()
            .insert(id, Rc::new(observer));
        ObserverId(id)
    }

    pub fn remove_press_observer(&self, id: ObserverId) -> bool {
        self.inner
            .press_observers
            .borrow_mut()
            .remove(&id.0)
            .is_some()
    }

    /// Total number of commits applied since creation.
    pub fn commit_count(&self) -> u64 {
        self.inner.commits.get()
    }

    fn with_cell<R>(&self, item: ItemId, f: impl FnOnce(&mut ItemDragState) -> R) -> R {
        if item >= self.inner.dense_limit {
            let mut sparse = self.inner.sparse.borrow_mut();
            return f(sparse.entry(item).or_default());
        }
        let mut cells = self.inner.cells.borrow_mut();
        if item >= cells.len() {
            cells.resize(item + 1, ItemDragState::default());
        }
        f(&mut cells[item])
    }

    fn notify_pressed(&self, item: ItemId) {
        // Snapshot so observers may add or remove observers.
        let observers: Vec<PressObserver> = self
            .inner
            .press_observers
            .borrow()
            .values()
            .cloned()
            .collect();
        for observer in observers {
            observer(item);
        }
    }
}

impl Default for DragAccumulatorStore {
    fn default() -> Self {
        Self::new()
    }
}
