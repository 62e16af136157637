//! Notification channel with auto-expiry
//!
//! Holds at most one visible message. [`Notifier::show`] replaces the
//! message and restarts the expiry countdown; [`Notifier::hide`] clears it
//! at once. The countdown is an owned timer (a cancellation token plus a
//! generation number) that is swapped under a lock on every call, so an
//! older message's timer can never clear a newer message.
//!
//! ## Flow
//!
//! ```text
//! show(A) ──→ timer#1 ──┐
//! show(B) ──→ cancel #1, timer#2 ──→ (auto_hide elapses) ──→ clear if still #2
//! hide()  ──→ cancel current timer, clear
//! ```
//!
//! Presentation layers read [`Notifier::current`] or react to changes via
//! [`Notifier::subscribe`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tasksync_core::config::DEFAULT_AUTO_HIDE_MS;
use tasksync_core::domain::ErrorKind;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::debug;

// ============================================================================
// Notification
// ============================================================================

/// A message currently shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Text shown in the notification area
    pub text: String,
    /// Failure kind the text was derived from, if any
    pub kind: Option<ErrorKind>,
    /// When the message was shown
    pub shown_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self {
            text: kind.message().to_string(),
            kind: Some(kind),
            shown_at: Utc::now(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: None,
            shown_at: Utc::now(),
        }
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Timer bookkeeping, only touched under the notifier lock
#[derive(Debug, Default)]
struct TimerSlot {
    /// Bumped on every show/hide; an expiry only clears its own generation
    generation: u64,
    /// Cancels the pending expiry task
    active: Option<CancellationToken>,
}

struct NotifierInner {
    auto_hide: Duration,
    tx: watch::Sender<Option<Notification>>,
    slot: Mutex<TimerSlot>,
}

/// Single-message notification channel
///
/// Cheap to clone; clones share the same message and timer.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl Notifier {
    /// Creates a notifier whose messages hide themselves after `auto_hide`
    pub fn new(auto_hide: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(NotifierInner {
                auto_hide,
                tx,
                slot: Mutex::new(TimerSlot::default()),
            }),
        }
    }

    pub fn auto_hide(&self) -> Duration {
        self.inner.auto_hide
    }

    /// Shows the fixed message for `kind`
    pub async fn show(&self, kind: ErrorKind) {
        self.show_notification(Notification::from_kind(kind)).await;
    }

    /// Shows free-form text
    pub async fn show_text(&self, text: impl Into<String>) {
        self.show_notification(Notification::text(text)).await;
    }

    /// Replaces the current message and restarts the expiry countdown
    ///
    /// Must be called from within a tokio runtime: the countdown runs as a
    /// spawned task.
    pub async fn show_notification(&self, notification: Notification) {
        let mut slot = self.inner.slot.lock().await;

        if let Some(previous) = slot.active.take() {
            previous.cancel();
        }
        slot.generation += 1;
        let generation = slot.generation;
        let cancel = CancellationToken::new();
        slot.active = Some(cancel.clone());

        debug!(generation, text = %notification.text, "Showing notification");
        self.inner.tx.send_replace(Some(notification));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(inner.auto_hide) => {
                    let mut slot = inner.slot.lock().await;
                    if slot.generation == generation {
                        slot.active = None;
                        inner.tx.send_replace(None);
                        debug!(generation, "Notification expired");
                    }
                }
            }
        });
    }

    /// Clears the message immediately and cancels any pending countdown
    pub async fn hide(&self) {
        let mut slot = self.inner.slot.lock().await;
        if let Some(active) = slot.active.take() {
            active.cancel();
        }
        slot.generation += 1;
        if self.inner.tx.send_replace(None).is_some() {
            debug!("Notification hidden");
        }
    }

    /// The message currently visible, if any
    pub fn current(&self) -> Option<Notification> {
        self.inner.tx.borrow().clone()
    }

    /// Text of the visible message, if any
    pub fn message(&self) -> Option<String> {
        self.inner.tx.borrow().as_ref().map(|n| n.text.clone())
    }

    /// Receiver that observes every change of the visible message
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.tx.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_AUTO_HIDE_MS))
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("auto_hide", &self.inner.auto_hide)
            .field("current", &self.current())
            .finish()
    }
}

// ============================================================================
// Unit tests
// ============================================================================
