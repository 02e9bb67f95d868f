use serde::{Deserialize, Serialize};

use crate::{CustomView, Cycle, Issue, Label, Project, Roadmap, Team};

/// Kind of a pinned favorite. Types the tree has no node for decode as
/// `Unknown` and are dropped during mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FavoriteType {
    Issue,
    Project,
    PredefinedView,
    CustomView,
    Cycle,
    Roadmap,
    Folder,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub sort_order: f64,
    #[serde(rename = "type")]
    pub favorite_type: FavoriteType,
    #[serde(default)]
    pub folder_name: Option<String>,
    /// Owning folder. Only used for folder grouping.
    #[serde(default)]
    pub parent: Option<FavoriteRef>,
    #[serde(default)]
    pub predefined_view_type: Option<String>,
    #[serde(default)]
    pub predefined_view_team: Option<Team>,
    #[serde(default)]
    pub issue: Option<Issue>,
    #[serde(default)]
    pub project: Option<Project>,
    #[serde(default)]
    pub cycle: Option<Cycle>,
    #[serde(default)]
    pub label: Option<Label>,
    #[serde(default)]
    pub custom_view: Option<CustomView>,
    #[serde(default)]
    pub roadmap: Option<Roadmap>,
}

impl Favorite {
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_ref().map(|p| p.id.as_str())
    }
}
