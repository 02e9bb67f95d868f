use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use super::bus::{RefreshBus, RefreshEvent};
use super::node::{Node, NodeKind};
use super::resolver::ChildResolver;
use crate::config::TreeConfig;
use crate::errors::GatewayError;
use crate::linear::Gateway;
use crate::tracker::VersionControl;
use crate::ui::presentation::{TreeItem, tree_item};

/// The host-facing tree: lazily resolved children, presentation of single
/// nodes and the refresh notifications hosts subscribe to.
///
/// The provider keeps the two root nodes it is asked to refresh directly
/// (current branch and favorites) and the last branch name the current
/// branch root was resolved against. Nothing else is cached.
pub struct TreeProvider {
    resolver: ChildResolver,
    vcs: Arc<dyn VersionControl>,
    bus: RefreshBus,
    current_branch_root: Node,
    favorites_root: Node,
}

impl TreeProvider {
    pub fn new(gateway: Arc<dyn Gateway>, vcs: Arc<dyn VersionControl>, config: TreeConfig) -> Self {
        let bus = RefreshBus::new();
        let resolver = ChildResolver::new(gateway, vcs.clone(), bus.clone(), config);
        Self {
            resolver,
            vcs,
            bus,
            current_branch_root: Node::from_kind(None, NodeKind::CurrentBranch),
            favorites_root: Node::from_kind(None, NodeKind::Favorites),
        }
    }

    /// Children of `node`, or the root set for `None`.
    pub async fn get_children(&self, node: Option<&Node>) -> Result<Vec<Node>, GatewayError> {
        self.resolver.resolve(node).await
    }

    pub fn get_tree_item(&self, node: &Node) -> TreeItem {
        let branch = match node.kind {
            NodeKind::CurrentBranch => self.vcs.current_branch_name(),
            _ => None,
        };
        tree_item(node, branch.as_deref())
    }

    /// Notify subscribers that `node`'s subtree (or everything) is stale.
    pub fn refresh(&self, node: Option<&Node>) {
        debug!(address = ?node.map(|n| n.address().to_string()), "refresh requested");
        self.bus.emit(node.map(Node::address));
    }

    pub fn refresh_current_branch(&self) {
        self.refresh(Some(&self.current_branch_root));
    }

    pub fn current_branch_root(&self) -> &Node {
        &self.current_branch_root
    }

    pub fn favorites_root(&self) -> &Node {
        &self.favorites_root
    }

    pub fn last_known_branch_name(&self) -> Option<String> {
        self.resolver.branch_memo().get()
    }

    /// Branch name git reports right now.
    pub fn live_branch_name(&self) -> Option<String> {
        self.vcs.current_branch_name()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.bus.subscribe()
    }
}
