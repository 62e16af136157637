//! Busy-set tracker
//!
//! A plain set of item ids that currently have a remote call in flight.
//! It carries no locking of its own: the engine keeps it inside its single
//! state container, so every add/remove from concurrently settling calls is
//! applied under the same lock as the collection update it belongs to.

use std::collections::BTreeSet;

use tasksync_core::domain::ItemId;

/// Set of item ids locked by an outstanding remote call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusySet {
    ids: BTreeSet<ItemId>,
}

impl BusySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` busy. Returns false if it already was.
    pub fn add(&mut self, id: ItemId) -> bool {
        self.ids.insert(id)
    }

    /// Releases `id`. Returns false if it was not busy.
    pub fn remove(&mut self, id: ItemId) -> bool {
        self.ids.remove(&id)
    }

    /// Marks every id in `ids` busy in one step
    pub fn add_many<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ItemId>,
    {
        self.ids.extend(ids);
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Busy ids in ascending order
    pub fn ids(&self) -> Vec<ItemId> {
        self.ids.iter().copied().collect()
    }
}
