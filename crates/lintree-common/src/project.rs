use serde::{Deserialize, Serialize};

use crate::{Connection, Issue, null_as_default};

/// Milestone reference embedded in a project. Bodies are fetched on expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub progress: f64,
    pub sort_order: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_milestones: Connection<MilestoneRef>,
}

impl Project {
    pub fn milestone_ids(&self) -> impl Iterator<Item = &str> {
        self.project_milestones.nodes.iter().map(|m| m.id.as_str())
    }
}

/// A project milestone with its active issues embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub sort_order: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Connection<Issue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub id: String,
    pub name: String,
}
