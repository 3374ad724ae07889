use crate::drag_store::ItemId;
use std::ops::Range;

/// The fixed, ordered set of item identities hosted by a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemCollection {
    count: usize,
}

impl ItemCollection {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, item: ItemId) -> bool {
        item < self.count
    }

    pub fn ids(&self) -> Range<ItemId> {
        0..self.count
    }
}

impl Default for ItemCollection {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ITEM_COUNT)
    }
}
