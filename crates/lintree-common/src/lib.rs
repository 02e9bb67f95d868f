//! Entity projections for the lintree tree engine.
//!
//! Every type here is a partial view of the Linear GraphQL schema holding only
//! the fields the tree needs: identity, display text, the `sortOrder` key and
//! the state fields that drive branching and icon selection. Nested entities
//! that are expanded lazily carry IDs only (a [`Project`] lists milestone IDs,
//! not milestone bodies).
//!
//! The types are plain serde data with no behaviour beyond small accessors.

mod favorite;
mod issue;
mod project;
mod user;
mod view;

pub use favorite::{Favorite, FavoriteRef, FavoriteType};
pub use issue::{
    Assignee, Attachment, AttachmentMetadata, Issue, PullRequestStatus, Review, ReviewState,
    SourceType, StateType, WorkflowState,
};
pub use project::{Milestone, MilestoneRef, Project, Roadmap};
pub use user::User;
pub use view::{CustomView, Cycle, Label, Team};

use serde::{Deserialize, Deserializer, Serialize};

/// GraphQL connection wrapper (`{ nodes: [...] }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> Connection<T> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_defaults_to_empty_when_nodes_missing() {
        let conn: Connection<MilestoneRef> = serde_json::from_str("{}").unwrap();
        assert!(conn.is_empty());
    }

    #[test]
    fn connection_keeps_node_order() {
        let conn: Connection<MilestoneRef> =
            serde_json::from_str(r#"{"nodes":[{"id":"b"},{"id":"a"}]}"#).unwrap();
        let ids: Vec<_> = conn.nodes.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
