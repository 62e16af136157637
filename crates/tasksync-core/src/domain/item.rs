//! List item types
//!
//! [`Item`] is a confirmed entry as returned by the remote store.
//! [`ItemPatch`] carries the partial fields of an update call.
//! [`PendingItem`] is the optimistic placeholder shown while a create call
//! is outstanding; it has no identifier until the store assigns one, so it
//! can never be confused with a confirmed item. [`ListEntry`] is the tagged
//! view over both.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::{ItemId, OwnerId};

// ============================================================================
// Item
// ============================================================================

/// A confirmed list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Identifier assigned by the remote store
    pub id: ItemId,
    /// Owner of the collection (`userId` on the wire)
    #[serde(rename = "userId")]
    pub owner_id: OwnerId,
    /// Display text
    pub title: String,
    /// Completion state
    pub completed: bool,
}

impl Item {
    /// Returns true if the item is not completed
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

// ============================================================================
// ItemPatch
// ============================================================================

/// Partial fields sent with an update call
///
/// Only the fields that are `Some` are serialized, so the store only sees
/// what actually changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl ItemPatch {
    /// Patch that only changes the completion state
    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }

    /// Patch that only changes the title
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }
}

// ============================================================================
// PendingItem
// ============================================================================

/// Optimistic placeholder for an item being created
///
/// Shown after the user submits a title and before the store confirms it.
/// It is not part of the authoritative collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingItem {
    title: String,
}

impl PendingItem {
    /// Create a placeholder from a raw title, trimming surrounding whitespace
    ///
    /// # Errors
    /// Returns `DomainError::EmptyTitle` if nothing is left after trimming
    pub fn new(raw_title: &str) -> Result<Self, DomainError> {
        let title = normalize_title(raw_title).ok_or(DomainError::EmptyTitle)?;
        Ok(Self { title })
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Trims a title; `None` when nothing is left
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// ListEntry
// ============================================================================

/// One row of the rendered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListEntry {
    /// An item confirmed by the remote store
    Confirmed(Item),
    /// The placeholder of an outstanding create call
    Pending(PendingItem),
}

impl ListEntry {
    pub fn title(&self) -> &str {
        match self {
            ListEntry::Confirmed(item) => &item.title,
            ListEntry::Pending(pending) => pending.title(),
        }
    }

    /// Identifier of a confirmed entry; `None` for the placeholder
    pub fn id(&self) -> Option<ItemId> {
        match self {
            ListEntry::Confirmed(item) => Some(item.id),
            ListEntry::Pending(_) => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            ListEntry::Confirmed(item) => item.completed,
            ListEntry::Pending(_) => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ListEntry::Pending(_))
    }
}
