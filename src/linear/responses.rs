//! GraphQL response envelopes.
//!
//! Each `*Data` struct mirrors the `data` object of one query in
//! [`super::queries`]. Nullable roots are `Option` so a missing entity comes
//! back as `None` rather than a decode failure.

use lintree_common::{Connection, Favorite, Issue, Milestone, Project, User};
use serde::Deserialize;

/// Top-level GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
}

/// Body shape used when only the `errors` array is of interest.
#[derive(Debug, Deserialize)]
pub struct ErrorsOnly {
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub viewer: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedIssues {
    pub assigned_issues: Connection<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct MyIssuesData {
    pub viewer: Option<AssignedIssues>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchIssueData {
    pub issue_vcs_branch_search: Option<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct FavoritesData {
    pub favorites: Connection<Favorite>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectData {
    pub project: Option<Project>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneData {
    pub project_milestone: Option<Milestone>,
}

#[derive(Debug, Deserialize)]
pub struct IssuesData {
    pub issues: Connection<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct IssuesHolder {
    pub issues: Connection<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectsHolder {
    pub projects: Connection<Project>,
}

#[derive(Debug, Deserialize)]
pub struct CycleIssuesData {
    pub cycle: Option<IssuesHolder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelIssuesData {
    pub issue_label: Option<IssuesHolder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomViewIssuesData {
    pub custom_view: Option<IssuesHolder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomViewProjectsData {
    pub custom_view: Option<ProjectsHolder>,
}

#[derive(Debug, Deserialize)]
pub struct RoadmapProjectsData {
    pub roadmap: Option<ProjectsHolder>,
}
