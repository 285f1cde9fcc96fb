//! Share adapters

use parking_lot::Mutex;
use tracing::debug;

use crate::error::FlowResult;
use crate::ports::ShareTarget;

/// Keeps the last shared text in memory.
#[derive(Debug, Default)]
pub struct InMemoryClipboard {
    contents: Mutex<Option<String>>,
    copies: Mutex<u64>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently copied text.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }

    /// Number of copies performed.
    pub fn copies(&self) -> u64 {
        *self.copies.lock()
    }
}

impl ShareTarget for InMemoryClipboard {
    fn share(&self, summary: &str) -> FlowResult<()> {
        *self.contents.lock() = Some(summary.to_string());
        *self.copies.lock() += 1;
        debug!(bytes = summary.len(), "Summary copied to clipboard");
        Ok(())
    }
}
