//! Remote store port (driven/secondary port)
//!
//! This module defines the interface to the remote store that holds the
//! authoritative copy of every user's list. The engine treats it as a black
//! box: each call either succeeds with a value or fails.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific
//!   and the engine does not classify them (network, HTTP status and parse
//!   failures all become the same user-facing message).
//! - Uses `#[async_trait]` for async trait methods.
//! - `update` returns the item as the store sees it after the change. The
//!   engine stores the returned values, not the ones it asked for.

use crate::domain::{Item, ItemId, ItemPatch, OwnerId};

/// Port trait for remote list store operations
///
/// ## Implementation Notes
///
/// - Implementations must not retry internally; a failed call is reported
///   to the user, who retries by repeating the action.
/// - Calls may be issued concurrently (batch operations), so implementations
///   must be safe to share across tasks.
#[async_trait::async_trait]
pub trait IRemoteStore: Send + Sync {
    /// Fetches every item owned by `owner`, in display order
    async fn list(&self, owner: OwnerId) -> anyhow::Result<Vec<Item>>;

    /// Creates a new, not completed item with the given title
    ///
    /// # Returns
    /// The stored item with its server-assigned id
    async fn create(&self, owner: OwnerId, title: &str) -> anyhow::Result<Item>;

    /// Applies a partial update to an item
    ///
    /// # Returns
    /// The item after the update, as echoed by the store
    async fn update(&self, id: ItemId, patch: &ItemPatch) -> anyhow::Result<Item>;

    /// Deletes an item
    async fn delete(&self, id: ItemId) -> anyhow::Result<()>;
}
