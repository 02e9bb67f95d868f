//! Node model for the issue tree.
//!
//! A [`Node`] is a tagged union over the fixed set of kinds the tree shows.
//! Each node carries a `uri` unique among its siblings (the remote entity ID
//! where one exists, a sentinel otherwise) and a non-owning link to its
//! parent. The `/`-joined chain of `uri`s from the root is the node's
//! [`NodeAddress`], the stable key the host uses to keep expand state and to
//! target a refresh at one subtree.

use lintree_common::{
    Attachment, CustomView, Cycle, Favorite, Issue, Milestone, Project, Roadmap, User,
};
use std::fmt;

/// Sentinel `uri`s for structural and message nodes.
pub mod sentinel {
    pub const CURRENT_BRANCH: &str = "currentBranch";
    pub const MY_ISSUES: &str = "myIssues";
    pub const FAVORITES: &str = "favorites";
    pub const NO_MILESTONE: &str = "noMilestone";
    pub const LOADING: &str = "loading";
    pub const NO_BRANCH_ISSUE: &str = "noBranchIssue";
    pub const NO_ISSUES: &str = "noIssues";
    pub const NO_PROJECTS: &str = "noProjects";
    pub const UNSUPPORTED: &str = "unsupported";
}

/// Full root-to-node address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeAddress(Vec<String>);

impl NodeAddress {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Address of a child with `uri` under this address.
    pub fn child(&self, uri: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(uri.to_string());
        Self(segments)
    }

    /// True when `self` is `other` or lies beneath it.
    pub fn starts_with(&self, other: &NodeAddress) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Fieldless mirror of [`NodeKind`] for logging and parent checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    CurrentBranch,
    MyIssues,
    Issue,
    Attachment,
    Project,
    Milestone,
    NoMilestone,
    Favorites,
    FavoriteFolder,
    Cycle,
    CustomView,
    Roadmap,
    Message,
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeTag::CurrentBranch => "currentBranch",
            NodeTag::MyIssues => "myIssues",
            NodeTag::Issue => "issue",
            NodeTag::Attachment => "attachment",
            NodeTag::Project => "project",
            NodeTag::Milestone => "milestone",
            NodeTag::NoMilestone => "noMilestone",
            NodeTag::Favorites => "favorites",
            NodeTag::FavoriteFolder => "favoriteFolder",
            NodeTag::Cycle => "cycle",
            NodeTag::CustomView => "customView",
            NodeTag::Roadmap => "roadmap",
            NodeTag::Message => "message",
        };
        f.write_str(name)
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    CurrentBranch,
    MyIssues { viewer: Option<User> },
    Issue { issue: Issue },
    Attachment { attachment: Attachment },
    Project { project: Project },
    Milestone { milestone: Milestone },
    NoMilestone { project: Project },
    Favorites,
    /// A favorites folder with its members pre-attached (parent links cleared).
    FavoriteFolder { name: String, children: Vec<Favorite> },
    Cycle { cycle: Cycle },
    CustomView { custom_view: CustomView },
    Roadmap { roadmap: Roadmap },
    /// Empty-state, loading or unsupported-feature leaf.
    Message { text: String },
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::CurrentBranch => NodeTag::CurrentBranch,
            NodeKind::MyIssues { .. } => NodeTag::MyIssues,
            NodeKind::Issue { .. } => NodeTag::Issue,
            NodeKind::Attachment { .. } => NodeTag::Attachment,
            NodeKind::Project { .. } => NodeTag::Project,
            NodeKind::Milestone { .. } => NodeTag::Milestone,
            NodeKind::NoMilestone { .. } => NodeTag::NoMilestone,
            NodeKind::Favorites => NodeTag::Favorites,
            NodeKind::FavoriteFolder { .. } => NodeTag::FavoriteFolder,
            NodeKind::Cycle { .. } => NodeTag::Cycle,
            NodeKind::CustomView { .. } => NodeTag::CustomView,
            NodeKind::Roadmap { .. } => NodeTag::Roadmap,
            NodeKind::Message { .. } => NodeTag::Message,
        }
    }
}

/// Navigational back-reference to a parent node. Holds the parent's address
/// and kind only; the parent itself is never kept alive by its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    pub address: NodeAddress,
    pub tag: NodeTag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub uri: String,
    pub parent: Option<ParentLink>,
    pub kind: NodeKind,
}

impl Node {
    /// Build a node. `uri` must be the entity ID or a sentinel.
    pub fn new(uri: impl Into<String>, parent: Option<&Node>, kind: NodeKind) -> Self {
        Self {
            uri: uri.into(),
            parent: parent.map(|p| ParentLink {
                address: p.address(),
                tag: p.tag(),
            }),
            kind,
        }
    }

    /// Build a node whose `uri` is derived from its payload.
    pub fn from_kind(parent: Option<&Node>, kind: NodeKind) -> Self {
        let uri = match &kind {
            NodeKind::CurrentBranch => sentinel::CURRENT_BRANCH.to_string(),
            NodeKind::MyIssues { .. } => sentinel::MY_ISSUES.to_string(),
            NodeKind::Favorites => sentinel::FAVORITES.to_string(),
            NodeKind::NoMilestone { .. } => sentinel::NO_MILESTONE.to_string(),
            NodeKind::Issue { issue } => issue.id.clone(),
            NodeKind::Attachment { attachment } => attachment.id.clone(),
            NodeKind::Project { project } => project.id.clone(),
            NodeKind::Milestone { milestone } => milestone.id.clone(),
            NodeKind::Cycle { cycle } => cycle.id.clone(),
            NodeKind::CustomView { custom_view } => custom_view.id.clone(),
            NodeKind::Roadmap { roadmap } => roadmap.id.clone(),
            // Folders and messages have no entity of their own; callers pass a uri.
            NodeKind::FavoriteFolder { name, .. } => name.clone(),
            NodeKind::Message { text } => text.clone(),
        };
        Self::new(uri, parent, kind)
    }

    /// A message leaf with a sentinel `uri`.
    pub fn message(sentinel: &str, text: impl Into<String>, parent: &Node) -> Self {
        Self::new(sentinel, Some(parent), NodeKind::Message { text: text.into() })
    }

    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    /// Root-to-node address.
    pub fn address(&self) -> NodeAddress {
        match &self.parent {
            Some(parent) => parent.address.child(&self.uri),
            None => NodeAddress::root().child(&self.uri),
        }
    }

    pub fn parent_tag(&self) -> Option<NodeTag> {
        self.parent.as_ref().map(|p| p.tag)
    }

    pub fn message_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Message { text } => Some(text),
            _ => None,
        }
    }
}

/// `/`-joined root-to-node path.
pub fn full_address(node: &Node) -> String {
    node.address().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::issue as fixture_issue;

    fn issue(id: &str) -> Issue {
        fixture_issue(id, 0.0)
    }

    #[test]
    fn root_nodes_address_is_their_sentinel() {
        let favorites = Node::from_kind(None, NodeKind::Favorites);
        assert_eq!(full_address(&favorites), "favorites");
        assert!(favorites.parent.is_none());
    }

    #[test]
    fn three_level_path_joins_uris() {
        let favorites = Node::from_kind(None, NodeKind::Favorites);
        let folder = Node::new(
            "f1",
            Some(&favorites),
            NodeKind::FavoriteFolder {
                name: "Pinned".to_string(),
                children: vec![],
            },
        );
        let leaf = Node::from_kind(Some(&folder), NodeKind::Issue { issue: issue("i1") });
        assert_eq!(full_address(&leaf), "favorites/f1/i1");
        assert_eq!(leaf.parent_tag(), Some(NodeTag::FavoriteFolder));
    }

    #[test]
    fn entity_nodes_use_entity_id_as_uri() {
        let root = Node::from_kind(None, NodeKind::CurrentBranch);
        let node = Node::from_kind(Some(&root), NodeKind::Issue { issue: issue("abc") });
        assert_eq!(node.uri, "abc");
        assert_eq!(node.address().to_string(), "currentBranch/abc");
    }

    #[test]
    fn message_nodes_use_sentinel_uri() {
        let root = Node::from_kind(None, NodeKind::MyIssues { viewer: None });
        let msg = Node::message(sentinel::NO_ISSUES, "No issues", &root);
        assert_eq!(full_address(&msg), "myIssues/noIssues");
        assert_eq!(msg.message_text(), Some("No issues"));
        assert_eq!(msg.tag(), NodeTag::Message);
    }

    #[test]
    fn address_prefix_matching() {
        let root = Node::from_kind(None, NodeKind::CurrentBranch);
        let child = Node::from_kind(Some(&root), NodeKind::Issue { issue: issue("x") });
        assert!(child.address().starts_with(&root.address()));
        assert!(!root.address().starts_with(&child.address()));
        assert_eq!(child.address(), NodeAddress::root().child("currentBranch").child("x"));
    }

    #[test]
    fn tag_display_matches_kind_names() {
        assert_eq!(NodeTag::FavoriteFolder.to_string(), "favoriteFolder");
        assert_eq!(NodeTag::NoMilestone.to_string(), "noMilestone");
    }
}
