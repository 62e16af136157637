//! Read-only view of the engine state
//!
//! A [`ListSnapshot`] is a consistent copy taken under the engine lock. The
//! presentation layer renders from it; nothing in it writes back.

use serde::Serialize;
use tasksync_core::domain::{Filter, Item, ItemId, ListEntry, PendingItem};

use crate::notifier::Notification;

/// Progress of the initial list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading,
    Loaded,
    /// The fetch failed; the list stays empty but usable
    Failed,
}

impl LoadState {
    /// Whether mutations may be issued
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed)
    }
}

/// An open rename session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSession {
    pub id: ItemId,
    /// In-progress text, untrimmed
    pub title: String,
}

/// Consistent copy of everything the presentation layer renders
#[derive(Debug, Clone, Serialize)]
pub struct ListSnapshot {
    pub load_state: LoadState,
    /// Confirmed items in display order
    pub items: Vec<Item>,
    /// Placeholder of an outstanding create call
    pub pending: Option<PendingItem>,
    pub busy: Vec<ItemId>,
    pub editing: Option<EditSession>,
    /// New-item input text
    pub draft: String,
    pub notification: Option<Notification>,
}

impl ListSnapshot {
    /// Number of items not yet completed
    pub fn items_left(&self) -> usize {
        self.items.iter().filter(|item| item.is_active()).count()
    }

    pub fn has_completed(&self) -> bool {
        self.items.iter().any(|item| item.completed)
    }

    /// True only for a non-empty list with every item completed
    pub fn all_completed(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.completed)
    }

    pub fn is_busy(&self, id: ItemId) -> bool {
        self.busy.contains(&id)
    }

    /// Rows are busy while their id is busy; the placeholder always is
    pub fn is_entry_busy(&self, entry: &ListEntry) -> bool {
        match entry.id() {
            Some(id) => self.is_busy(id),
            None => true,
        }
    }

    pub fn is_editing(&self, id: ItemId) -> bool {
        self.editing.as_ref().is_some_and(|session| session.id == id)
    }

    /// Rows visible under `filter`, with the placeholder always last
    pub fn entries(&self, filter: Filter) -> Vec<ListEntry> {
        let mut entries: Vec<ListEntry> = filter
            .apply(&self.items)
            .into_iter()
            .cloned()
            .map(ListEntry::Confirmed)
            .collect();
        if let Some(pending) = &self.pending {
            entries.push(ListEntry::Pending(pending.clone()));
        }
        entries
    }
}
