//! TaskSync Sync - Optimistic concurrent synchronization engine
//!
//! Provides:
//! - Single-item and batch operations against an [`IRemoteStore`](tasksync_core::ports::IRemoteStore)
//! - Per-item busy tracking so a presentation layer can lock rows individually
//! - Partial-failure reconciliation for concurrent batches
//! - Transient notifications with auto-expiry
//!
//! ## Modules
//!
//! - [`engine`] - The synchronization engine owning the authoritative collection
//! - [`busy`] - Set of item ids with a remote call in flight
//! - [`notifier`] - Single-message notification channel with an expiry timer
//! - [`snapshot`] - Read-only view handed to the presentation layer

pub mod busy;
pub mod engine;
pub mod notifier;
pub mod snapshot;

use tasksync_core::domain::{ErrorKind, ItemId};
use thiserror::Error;

/// Errors returned by engine operations
///
/// Every failure the user should see is also pushed to the
/// [`Notifier`](notifier::Notifier); the returned error is for programmatic
/// callers (exit codes, logging).
#[derive(Debug, Error)]
pub enum SyncError {
    /// The title was blank after trimming; the store was not contacted
    #[error("Title must not be empty")]
    EmptyTitle,

    /// The remote store rejected or failed the call
    #[error("{kind}: {source:#}")]
    Remote {
        /// Which user-facing message was shown
        kind: ErrorKind,
        /// Adapter error with its context chain
        #[source]
        source: anyhow::Error,
    },

    /// The item is not in the collection
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// The item already has a call in flight
    #[error("Item {0} is busy with another operation")]
    Busy(ItemId),

    /// A create call is still outstanding
    #[error("Another item is still being created")]
    CreateInProgress,

    /// Mutations are refused until the initial load has settled
    #[error("The list has not been loaded yet")]
    NotLoaded,

    /// `submit_edit` was called with no edit session open
    #[error("No item is being edited")]
    NotEditing,
}

impl SyncError {
    pub(crate) fn remote(kind: ErrorKind, source: anyhow::Error) -> Self {
        SyncError::Remote { kind, source }
    }

    /// The user-facing kind this error was reported as, if any
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SyncError::EmptyTitle => Some(ErrorKind::EmptyTitle),
            SyncError::Remote { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
