//! Optimistic synchronization engine
//!
//! The [`SyncEngine`] owns the authoritative in-memory collection and keeps
//! it consistent with an [`IRemoteStore`] while several calls are in flight.
//!
//! ## Operation Flow
//!
//! 1. **Acquire**: under the state lock, check preconditions and mark the
//!    affected ids busy
//! 2. **Call**: issue the remote call with the lock released
//! 3. **Settle**: under the lock again, release the busy id and apply the
//!    result by id to whatever the collection looks like now
//!
//! Every claim taken in step 1 (a busy id or the create placeholder) is held
//! by a [`Release`] guard. If the operation future is dropped before it
//! settles, the guard gives the claim back.
//!
//! Failures never roll back siblings. User-facing failures are pushed to
//! the [`Notifier`] and also returned as [`SyncError`] for callers that want
//! an exit status.
//!
//! ## Batches
//!
//! [`SyncEngine::clear_completed`] and [`SyncEngine::toggle_all`] issue all
//! calls together and apply each completion as it settles. A single
//! aggregate notification is shown once every call has settled.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use tasksync_core::config::{Config, DEFAULT_AUTO_HIDE_MS};
use tasksync_core::domain::{DomainError, ErrorKind, Item, ItemId, ItemPatch, OwnerId, PendingItem};
use tasksync_core::ports::IRemoteStore;

use crate::busy::BusySet;
use crate::notifier::Notifier;
use crate::snapshot::{EditSession, ListSnapshot, LoadState};
use crate::SyncError;

// ============================================================================
// Options and results
// ============================================================================

/// Engine tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Refuse a second operation on an id that is already busy
    ///
    /// Off by default: overlapping calls on one id are issued as requested.
    pub reject_busy: bool,
    /// How long a notification stays visible
    pub auto_hide: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            reject_busy: false,
            auto_hide: Duration::from_millis(DEFAULT_AUTO_HIDE_MS),
        }
    }
}

/// Per-id outcome of a batch operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Ids whose call succeeded, in collection order
    pub succeeded: Vec<ItemId>,
    /// Ids whose call failed, in collection order
    pub failed: Vec<ItemId>,
    /// Ids left out because another call on them was in flight
    pub skipped: Vec<ItemId>,
}

impl BatchReport {
    /// Total number of calls issued
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// What a rename ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The trimmed title equals the stored one; nothing was sent
    Unchanged,
    /// The store accepted the new title
    Renamed(Item),
    /// The trimmed title was empty and the item was deleted
    Deleted,
}

// ============================================================================
// State
// ============================================================================

/// Everything guarded by the engine lock
#[derive(Debug, Default)]
struct EngineState {
    load_state: LoadState,
    items: Vec<Item>,
    pending: Option<PendingItem>,
    busy: BusySet,
    editing: Option<EditSession>,
    draft: String,
}

impl EngineState {
    fn ensure_loaded(&self) -> Result<(), SyncError> {
        if self.load_state.is_settled() {
            Ok(())
        } else {
            Err(SyncError::NotLoaded)
        }
    }

    fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn find_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    fn end_editing(&mut self, id: ItemId) {
        if self.editing.as_ref().is_some_and(|s| s.id == id) {
            self.editing = None;
        }
    }

    /// Keeps the rename text around after a failed submit
    fn keep_editing(&mut self, id: ItemId, title: &str) {
        match &mut self.editing {
            Some(session) if session.id == id => session.title = title.to_string(),
            Some(_) => {}
            None => {
                self.editing = Some(EditSession {
                    id,
                    title: title.to_string(),
                })
            }
        }
    }
}

struct EngineInner {
    store: Arc<dyn IRemoteStore>,
    owner: OwnerId,
    notifier: Notifier,
    reject_busy: bool,
    state: RwLock<EngineState>,
}

// ============================================================================
// Claims
// ============================================================================

/// Something an operation holds in the state until its call settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Busy(ItemId),
    Placeholder,
}

impl Claim {
    fn release(self, state: &mut EngineState) {
        match self {
            Claim::Busy(id) => {
                state.busy.remove(id);
            }
            Claim::Placeholder => state.pending = None,
        }
    }
}

/// Gives a [`Claim`] back when dropped, unless it was settled first
struct Release {
    inner: Arc<EngineInner>,
    claim: Claim,
    armed: bool,
}

impl Release {
    fn new(inner: &Arc<EngineInner>, claim: Claim) -> Self {
        Self {
            inner: Arc::clone(inner),
            claim,
            armed: true,
        }
    }

    /// Releases the claim under a lock the caller already holds
    fn settle(mut self, state: &mut EngineState) {
        self.armed = false;
        self.claim.release(state);
    }
}

impl Drop for Release {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let claim = self.claim;
        debug!(?claim, "Operation dropped before settling");

        if let Ok(mut state) = self.inner.state.try_write() {
            claim.release(&mut state);
            return;
        }
        // Lock contended: release from a task instead of blocking in drop
        let inner = Arc::clone(&self.inner);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let mut state = inner.state.write().await;
                    claim.release(&mut state);
                });
            }
            Err(_) => warn!(?claim, "No runtime to release claim"),
        }
    }
}

// ============================================================================
// SyncEngine
// ============================================================================

/// Keeps a local list of items in step with a remote store
///
/// Cheap to clone; clones share state, so operations may be driven from
/// several tasks at once.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<EngineInner>,
}

impl SyncEngine {
    /// Creates an engine with default options
    pub fn new(store: Arc<dyn IRemoteStore>, owner: OwnerId) -> Self {
        Self::with_options(store, owner, EngineOptions::default())
    }

    pub fn with_options(
        store: Arc<dyn IRemoteStore>,
        owner: OwnerId,
        options: EngineOptions,
    ) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                store,
                owner,
                notifier: Notifier::new(options.auto_hide),
                reject_busy: options.reject_busy,
                state: RwLock::new(EngineState::default()),
            }),
        }
    }

    /// Creates an engine from the loaded configuration
    ///
    /// Fails if the owner id has not been configured.
    pub fn from_config(
        store: Arc<dyn IRemoteStore>,
        config: &Config,
    ) -> Result<Self, DomainError> {
        let owner = config.owner()?;
        let options = EngineOptions {
            reject_busy: config.engine.reject_busy,
            auto_hide: config.auto_hide(),
        };
        Ok(Self::with_options(store, owner, options))
    }

    pub fn owner(&self) -> OwnerId {
        self.inner.owner
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    // ------------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------------

    /// Fetches the full collection and replaces the local one
    ///
    /// On failure the collection is left as it was and the load is marked
    /// failed, which still unlocks mutations.
    #[instrument(skip(self), fields(owner = %self.inner.owner))]
    pub async fn load(&self) -> Result<(), SyncError> {
        self.inner.state.write().await.load_state = LoadState::Loading;
        self.inner.notifier.hide().await;

        let result = self.inner.store.list(self.inner.owner).await;

        let mut state = self.inner.state.write().await;
        match result {
            Ok(items) => {
                info!(count = items.len(), "Loaded items");
                state.items = items;
                state.load_state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                state.load_state = LoadState::Failed;
                drop(state);
                warn!(error = %e, "Failed to load items");
                self.inner.notifier.show(ErrorKind::Load).await;
                Err(SyncError::remote(ErrorKind::Load, e))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------------

    /// Replaces the new-item input text
    pub async fn set_draft(&self, text: impl Into<String>) {
        self.inner.state.write().await.draft = text.into();
    }

    /// Creates an item from the current draft
    pub async fn submit_draft(&self) -> Result<Item, SyncError> {
        let draft = self.inner.state.read().await.draft.clone();
        self.create(&draft).await
    }

    /// Creates an item from `title`
    ///
    /// A placeholder with the trimmed title is visible while the call is
    /// outstanding. The raw input stays in the draft on failure so it can
    /// be retried.
    #[instrument(skip(self))]
    pub async fn create(&self, title: &str) -> Result<Item, SyncError> {
        let (pending, release) = {
            let mut state = self.inner.state.write().await;
            state.ensure_loaded()?;
            if state.pending.is_some() {
                return Err(SyncError::CreateInProgress);
            }
            state.draft = title.to_string();
            match PendingItem::new(title) {
                Ok(pending) => {
                    state.pending = Some(pending.clone());
                    (pending, Release::new(&self.inner, Claim::Placeholder))
                }
                Err(_) => {
                    drop(state);
                    debug!("Rejected blank title");
                    self.inner.notifier.show(ErrorKind::EmptyTitle).await;
                    return Err(SyncError::EmptyTitle);
                }
            }
        };
        self.inner.notifier.hide().await;

        let result = self.inner.store.create(self.inner.owner, pending.title()).await;

        let mut state = self.inner.state.write().await;
        release.settle(&mut state);
        match result {
            Ok(item) => {
                info!(id = %item.id, "Created item");
                state.items.push(item.clone());
                state.draft.clear();
                Ok(item)
            }
            Err(e) => {
                drop(state);
                warn!(error = %e, "Failed to create item");
                self.inner.notifier.show(ErrorKind::Add).await;
                Err(SyncError::remote(ErrorKind::Add, e))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Single-item operations
    // ------------------------------------------------------------------------

    /// Deletes one item
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ItemId) -> Result<(), SyncError> {
        let release = self.acquire(id).await?;
        self.inner.notifier.hide().await;

        let result = self.remote_delete(id, release).await;
        if result.is_err() {
            self.inner.notifier.show(ErrorKind::Delete).await;
        }
        result
    }

    /// Sets the completion flag of one item
    ///
    /// The stored flag is whatever the store echoes back.
    #[instrument(skip(self))]
    pub async fn toggle(&self, id: ItemId, completed: bool) -> Result<Item, SyncError> {
        let release = self.acquire(id).await?;
        self.inner.notifier.hide().await;

        let result = self
            .remote_update(id, ItemPatch::completed(completed), release)
            .await;
        if result.is_err() {
            self.inner.notifier.show(ErrorKind::Update).await;
        }
        result
    }

    /// Renames one item
    ///
    /// An unchanged title sends nothing. A blank title deletes the item.
    /// On failure the edit session stays open with `new_title` in it.
    #[instrument(skip(self))]
    pub async fn rename(&self, id: ItemId, new_title: &str) -> Result<RenameOutcome, SyncError> {
        let trimmed = new_title.trim();
        let release = {
            let mut state = self.inner.state.write().await;
            state.ensure_loaded()?;
            let current = state.find(id).ok_or(SyncError::NotFound(id))?;
            if current.title == trimmed {
                state.end_editing(id);
                debug!(%id, "Title unchanged");
                return Ok(RenameOutcome::Unchanged);
            }
            self.mark_busy(&mut state, id)?
        };
        self.inner.notifier.hide().await;

        if trimmed.is_empty() {
            match self.remote_delete(id, release).await {
                Ok(()) => Ok(RenameOutcome::Deleted),
                Err(e) => {
                    self.inner.state.write().await.keep_editing(id, new_title);
                    self.inner.notifier.show(ErrorKind::Delete).await;
                    Err(e)
                }
            }
        } else {
            match self.remote_update(id, ItemPatch::title(trimmed), release).await {
                Ok(item) => {
                    self.inner.state.write().await.end_editing(id);
                    Ok(RenameOutcome::Renamed(item))
                }
                Err(e) => {
                    self.inner.state.write().await.keep_editing(id, new_title);
                    self.inner.notifier.show(ErrorKind::Update).await;
                    Err(e)
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Edit session
    // ------------------------------------------------------------------------

    /// Opens an edit session on `id`, seeded with its current title
    ///
    /// Refused while the item is busy. Replaces any other open session.
    pub async fn start_editing(&self, id: ItemId) -> Result<(), SyncError> {
        let mut state = self.inner.state.write().await;
        let title = state.find(id).ok_or(SyncError::NotFound(id))?.title.clone();
        if state.busy.contains(id) {
            return Err(SyncError::Busy(id));
        }
        state.editing = Some(EditSession { id, title });
        Ok(())
    }

    pub async fn set_edit_title(&self, text: impl Into<String>) -> Result<(), SyncError> {
        let mut state = self.inner.state.write().await;
        let session = state.editing.as_mut().ok_or(SyncError::NotEditing)?;
        session.title = text.into();
        Ok(())
    }

    /// Closes the edit session without sending anything
    pub async fn cancel_editing(&self) {
        self.inner.state.write().await.editing = None;
    }

    /// Renames the edited item to the session text
    pub async fn submit_edit(&self) -> Result<RenameOutcome, SyncError> {
        let session = self
            .inner
            .state
            .read()
            .await
            .editing
            .clone()
            .ok_or(SyncError::NotEditing)?;
        self.rename(session.id, &session.title).await
    }

    // ------------------------------------------------------------------------
    // Batches
    // ------------------------------------------------------------------------

    /// Deletes every completed item concurrently
    ///
    /// Successful deletes stay applied when siblings fail. One `Delete`
    /// notification is shown if anything failed.
    #[instrument(skip(self))]
    pub async fn clear_completed(&self) -> Result<BatchReport, SyncError> {
        let (ids, skipped, releases) = {
            let mut state = self.inner.state.write().await;
            state.ensure_loaded()?;
            let candidates: Vec<ItemId> = state
                .items
                .iter()
                .filter(|item| item.completed)
                .map(|item| item.id)
                .collect();
            let (skipped, ids) = self.partition_busy(&state, candidates);
            let releases = self.claim_all(&mut state, &ids);
            (ids, skipped, releases)
        };
        if ids.is_empty() {
            return Ok(Self::report(Vec::new(), skipped));
        }
        self.inner.notifier.hide().await;
        info!(count = ids.len(), skipped = skipped.len(), "Deleting completed items");

        let results = join_all(
            ids.into_iter()
                .zip(releases)
                .map(|(id, release)| async move { (id, self.remote_delete(id, release).await) }),
        )
        .await;
        let report = Self::report(results, skipped);
        if !report.is_success() {
            warn!(failed = report.failed.len(), "Some deletes failed");
            self.inner.notifier.show(ErrorKind::Delete).await;
        }
        Ok(report)
    }

    /// Marks every item completed, or every item active if all already are
    ///
    /// Only items whose flag differs from the target are sent. One `Update`
    /// notification is shown if anything failed.
    #[instrument(skip(self))]
    pub async fn toggle_all(&self) -> Result<BatchReport, SyncError> {
        let (target, ids, skipped, releases) = {
            let mut state = self.inner.state.write().await;
            state.ensure_loaded()?;
            if state.items.is_empty() {
                return Ok(BatchReport::default());
            }
            let target = !state.items.iter().all(|item| item.completed);
            let candidates: Vec<ItemId> = state
                .items
                .iter()
                .filter(|item| item.completed != target)
                .map(|item| item.id)
                .collect();
            let (skipped, ids) = self.partition_busy(&state, candidates);
            let releases = self.claim_all(&mut state, &ids);
            (target, ids, skipped, releases)
        };
        if ids.is_empty() {
            return Ok(Self::report(Vec::new(), skipped));
        }
        self.inner.notifier.hide().await;
        info!(count = ids.len(), skipped = skipped.len(), target, "Toggling items");

        let results = join_all(ids.into_iter().zip(releases).map(|(id, release)| async move {
            let result = self
                .remote_update(id, ItemPatch::completed(target), release)
                .await;
            (id, result.map(|_| ()))
        }))
        .await;
        let report = Self::report(results, skipped);
        if !report.is_success() {
            warn!(failed = report.failed.len(), "Some updates failed");
            self.inner.notifier.show(ErrorKind::Update).await;
        }
        Ok(report)
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    /// Consistent copy of the state for rendering
    pub async fn snapshot(&self) -> ListSnapshot {
        let state = self.inner.state.read().await;
        ListSnapshot {
            load_state: state.load_state,
            items: state.items.clone(),
            pending: state.pending.clone(),
            busy: state.busy.ids(),
            editing: state.editing.clone(),
            draft: state.draft.clone(),
            notification: self.inner.notifier.current(),
        }
    }

    pub async fn items(&self) -> Vec<Item> {
        self.inner.state.read().await.items.clone()
    }

    pub async fn item(&self, id: ItemId) -> Option<Item> {
        self.inner.state.read().await.find(id).cloned()
    }

    pub async fn is_busy(&self, id: ItemId) -> bool {
        self.inner.state.read().await.busy.contains(id)
    }

    pub async fn load_state(&self) -> LoadState {
        self.inner.state.read().await.load_state
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Checks preconditions for a single-item call and marks `id` busy
    async fn acquire(&self, id: ItemId) -> Result<Release, SyncError> {
        let mut state = self.inner.state.write().await;
        state.ensure_loaded()?;
        if state.find(id).is_none() {
            return Err(SyncError::NotFound(id));
        }
        self.mark_busy(&mut state, id)
    }

    fn mark_busy(&self, state: &mut EngineState, id: ItemId) -> Result<Release, SyncError> {
        if !state.busy.add(id) && self.inner.reject_busy {
            debug!(%id, "Item already busy");
            return Err(SyncError::Busy(id));
        }
        Ok(Release::new(&self.inner, Claim::Busy(id)))
    }

    /// Splits batch candidates into `(skipped, issued)`
    ///
    /// Nothing is skipped unless busy ids are rejected.
    fn partition_busy(
        &self,
        state: &EngineState,
        candidates: Vec<ItemId>,
    ) -> (Vec<ItemId>, Vec<ItemId>) {
        if !self.inner.reject_busy {
            return (Vec::new(), candidates);
        }
        let (skipped, ids): (Vec<ItemId>, Vec<ItemId>) =
            candidates.into_iter().partition(|id| state.busy.contains(*id));
        if !skipped.is_empty() {
            debug!(count = skipped.len(), "Skipping busy items");
        }
        (skipped, ids)
    }

    /// Marks every id in `ids` busy in one step
    fn claim_all(&self, state: &mut EngineState, ids: &[ItemId]) -> Vec<Release> {
        state.busy.add_many(ids.iter().copied());
        ids.iter()
            .map(|&id| Release::new(&self.inner, Claim::Busy(id)))
            .collect()
    }

    /// Deletes `id` remotely, then releases it and applies the result
    async fn remote_delete(&self, id: ItemId, release: Release) -> Result<(), SyncError> {
        let result = self.inner.store.delete(id).await;

        let mut state = self.inner.state.write().await;
        release.settle(&mut state);
        match result {
            Ok(()) => {
                state.items.retain(|item| item.id != id);
                state.end_editing(id);
                debug!(%id, "Deleted item");
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "Failed to delete item");
                Err(SyncError::remote(ErrorKind::Delete, e))
            }
        }
    }

    /// Patches `id` remotely, then releases it and stores the echoed fields
    ///
    /// Only the fields present in `patch` are taken from the echo.
    async fn remote_update(
        &self,
        id: ItemId,
        patch: ItemPatch,
        release: Release,
    ) -> Result<Item, SyncError> {
        let result = self.inner.store.update(id, &patch).await;

        let mut state = self.inner.state.write().await;
        release.settle(&mut state);
        match result {
            Ok(echo) => {
                debug!(%id, "Updated item");
                match state.find_mut(id) {
                    Some(item) => {
                        if patch.completed.is_some() {
                            item.completed = echo.completed;
                        }
                        if patch.title.is_some() {
                            item.title = echo.title;
                        }
                        Ok(item.clone())
                    }
                    None => Ok(echo),
                }
            }
            Err(e) => {
                warn!(%id, error = %e, "Failed to update item");
                Err(SyncError::remote(ErrorKind::Update, e))
            }
        }
    }

    fn report(results: Vec<(ItemId, Result<(), SyncError>)>, skipped: Vec<ItemId>) -> BatchReport {
        let mut report = BatchReport {
            skipped,
            ..BatchReport::default()
        };
        for (id, result) in results {
            match result {
                Ok(()) => report.succeeded.push(id),
                Err(_) => report.failed.push(id),
            }
        }
        report
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("owner", &self.inner.owner)
            .field("reject_busy", &self.inner.reject_busy)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Unit tests
// ============================================================================
