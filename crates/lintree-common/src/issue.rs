use serde::{Deserialize, Serialize};

use crate::{Connection, null_as_default};

/// Workflow state category. Only the categories the tree branches on are
/// named; anything else the API adds later lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateType {
    Triage,
    Backlog,
    Unstarted,
    Started,
    Completed,
    Canceled,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    #[serde(rename = "type")]
    pub state_type: StateType,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub url: String,
    pub identifier: String,
    pub branch_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub sort_order: f64,
    #[serde(default)]
    pub assignee: Option<Assignee>,
    pub state: WorkflowState,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Connection<Attachment>,
}

impl Issue {
    /// First attachment linked from GitHub (a pull request), if any.
    pub fn github_attachment(&self) -> Option<&Attachment> {
        self.attachments
            .nodes
            .iter()
            .find(|a| a.source_type == SourceType::Github)
    }
}

/// Where an attachment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    Github,
    GithubCommit,
    Figma,
    Slack,
    #[default]
    #[serde(other)]
    Other,
}

/// Pull request status reported in GitHub attachment metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PullRequestStatus {
    Merged,
    InReview,
    Closed,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewState {
    Approved,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub state: ReviewState,
}

/// Free-form attachment metadata. `status` and `reviews` are typed because
/// presentation switches on them; every other key is carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentMetadata {
    #[serde(default)]
    pub status: Option<PullRequestStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AttachmentMetadata {
    pub fn is_approved(&self) -> bool {
        self.reviews.iter().any(|r| r.state == ReviewState::Approved)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_type: SourceType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: AttachmentMetadata,
}
