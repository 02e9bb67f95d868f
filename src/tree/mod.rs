//! The issue tree: node model, child resolution, refresh notifications and
//! the pollers that keep the current-branch subtree fresh.

pub mod bus;
pub mod node;
pub mod poller;
pub mod provider;
pub mod resolver;

#[cfg(test)]
pub(crate) mod fixtures;

pub use bus::{RefreshBus, RefreshEvent};
pub use node::{Node, NodeAddress, NodeKind, NodeTag, full_address};
pub use poller::{FocusState, PollerHandle, spawn_pollers};
pub use provider::TreeProvider;
pub use resolver::ChildResolver;
