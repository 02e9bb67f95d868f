//! Refresh Bus: the change-notification channel for the tree.
//!
//! `RefreshEvent::All` means the whole tree is stale; `Subtree(address)` means
//! only that node's children may have changed, so the host re-requests
//! children for that node alone and keeps every other expansion intact.

use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use super::node::NodeAddress;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshEvent {
    All,
    Subtree(NodeAddress),
}

impl RefreshEvent {
    /// Whether a host showing `address` must re-request its children.
    pub fn affects(&self, address: &NodeAddress) -> bool {
        match self {
            RefreshEvent::All => true,
            RefreshEvent::Subtree(target) => address.starts_with(target),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefreshBus {
    tx: broadcast::Sender<RefreshEvent>,
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.tx.subscribe()
    }

    /// Emit a refresh. `None` invalidates the whole tree.
    pub fn emit(&self, target: Option<NodeAddress>) {
        let event = match target {
            Some(address) => RefreshEvent::Subtree(address),
            None => RefreshEvent::All,
        };
        trace!(?event, "refresh");
        // No subscribers just means no host is listening yet.
        let _ = self.tx.send(event);
    }

    /// Emit a refresh of `target` once, after `delay`.
    pub fn schedule(&self, target: NodeAddress, delay: Duration) {
        debug!(address = %target, delay_ms = delay.as_millis() as u64, "scheduling refresh");
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(RefreshEvent::Subtree(target));
        });
    }
}
