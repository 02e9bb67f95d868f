//! Remote Query Gateway.
//!
//! A thin typed request layer over the Linear GraphQL API. Every method issues
//! one fixed query from [`queries`] and returns the projection it selects.
//! Single-entity fetches return `None` when the API has nothing; list fetches
//! return an empty vector.

pub mod client;
pub mod queries;
pub mod responses;

pub use client::LinearClient;

use async_trait::async_trait;
use lintree_common::{Favorite, Issue, Milestone, Project, User};

use crate::errors::GatewayError;

/// Abstraction over the Linear API for testability.
/// Real implementation: `LinearClient`. Test doubles live beside the resolver tests.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_viewer(&self) -> Result<Option<User>, GatewayError>;

    /// Issues assigned to the viewer in triage, backlog, unstarted or started states.
    async fn fetch_my_issues(&self) -> Result<Vec<Issue>, GatewayError>;

    /// The issue whose version-control branch name matches `branch`.
    async fn fetch_branch_issue(&self, branch: &str) -> Result<Option<Issue>, GatewayError>;

    async fn fetch_favorites(&self) -> Result<Vec<Favorite>, GatewayError>;

    async fn fetch_project(&self, id: &str) -> Result<Option<Project>, GatewayError>;

    async fn fetch_milestone(&self, id: &str) -> Result<Option<Milestone>, GatewayError>;

    /// Active issues of a project that belong to no milestone.
    async fn fetch_no_milestone_issues(&self, project_id: &str)
    -> Result<Vec<Issue>, GatewayError>;

    async fn fetch_cycle_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError>;

    async fn fetch_label_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError>;

    async fn fetch_custom_view_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError>;

    async fn fetch_custom_view_projects(&self, id: &str) -> Result<Vec<Project>, GatewayError>;

    async fn fetch_roadmap_projects(&self, id: &str) -> Result<Vec<Project>, GatewayError>;
}
