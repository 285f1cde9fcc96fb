//! # Display Bus
//!
//! In-memory fan-out of view models to any number of renderers.
//!
//! Uses `tokio::sync::broadcast`; a renderer that falls behind skips to the
//! newest view, which is all a renderer needs.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::ViewModel;
use crate::ports::DisplaySink;

/// Views buffered per subscriber before the oldest are dropped.
pub const DEFAULT_DISPLAY_CAPACITY: usize = 64;

pub struct InMemoryDisplayBus {
    sender: broadcast::Sender<ViewModel>,
    latest: RwLock<Option<ViewModel>>,
    published: AtomicU64,
}

impl InMemoryDisplayBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DISPLAY_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            latest: RwLock::new(None),
            published: AtomicU64::new(0),
        }
    }

    /// Receive every view published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ViewModel> {
        self.sender.subscribe()
    }

    /// Last published view, if any.
    pub fn latest(&self) -> Option<ViewModel> {
        self.latest.read().clone()
    }

    /// Total views published.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryDisplayBus {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for InMemoryDisplayBus {
    fn publish(&self, view: &ViewModel) {
        self.published.fetch_add(1, Ordering::Relaxed);
        *self.latest.write() = Some(view.clone());

        // No subscribers is normal before a renderer attaches
        let receivers = self.sender.send(view.clone()).unwrap_or(0);
        trace!(
            screen = %view.active_screen,
            receivers,
            "View published"
        );
    }
}
