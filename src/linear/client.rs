use async_trait::async_trait;
use lintree_common::{Favorite, Issue, Milestone, Project, User};
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::Gateway;
use super::queries;
use super::responses::*;
use crate::config::Config;
use crate::errors::GatewayError;

pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Prefix of Linear personal API keys. These are sent bare in the
/// `Authorization` header; OAuth access tokens need the `Bearer` scheme.
const PERSONAL_KEY_PREFIX: &str = "lin_api_";

/// Build the `Authorization` header value for a Linear credential.
pub fn authorization_value(token: &str) -> String {
    let token = token.trim();
    if token.starts_with(PERSONAL_KEY_PREFIX) || token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

/// GraphQL client for the Linear API.
#[derive(Debug, Clone)]
pub struct LinearClient {
    http: reqwest::Client,
    endpoint: String,
    authorization: String,
}

impl LinearClient {
    pub fn new(endpoint: impl Into<String>, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            authorization: authorization_value(token),
        }
    }

    /// Build a client from runtime configuration, failing when no API key is set.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let token = config
            .api_key
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GatewayError::MissingToken {
                env_var: config.token_env.clone(),
            })?;
        Ok(Self::new(config.api_endpoint.clone(), token))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one GraphQL operation and return its `data` object, if any.
    async fn request<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<Option<T>, GatewayError> {
        debug!(operation, "linear request");
        let resp = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.authorization)
            .header(USER_AGENT, "lintree")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "linear request rejected");
            // Linear reports validation failures as 400 with a GraphQL errors body.
            if let Ok(parsed) = serde_json::from_str::<ErrorsOnly>(&body)
                && !parsed.errors.is_empty()
            {
                return Err(GatewayError::GraphQl {
                    operation: operation.to_string(),
                    messages: parsed.errors.into_iter().map(|e| e.message).collect(),
                });
            }
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> =
            serde_json::from_str(&body).map_err(|source| GatewayError::Decode {
                operation: operation.to_string(),
                source,
            })?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            return Err(GatewayError::GraphQl {
                operation: operation.to_string(),
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        Ok(envelope.data)
    }
}

#[async_trait]
impl Gateway for LinearClient {
    async fn fetch_viewer(&self) -> Result<Option<User>, GatewayError> {
        let data: Option<ViewerData> = self.request("Viewer", queries::VIEWER, json!({})).await?;
        Ok(data.and_then(|d| d.viewer))
    }

    async fn fetch_my_issues(&self) -> Result<Vec<Issue>, GatewayError> {
        let data: Option<MyIssuesData> = self
            .request("MyIssues", queries::MY_ISSUES, json!({}))
            .await?;
        Ok(data
            .and_then(|d| d.viewer)
            .map(|v| v.assigned_issues.nodes)
            .unwrap_or_default())
    }

    async fn fetch_branch_issue(&self, branch: &str) -> Result<Option<Issue>, GatewayError> {
        let data: Option<BranchIssueData> = self
            .request(
                "BranchIssue",
                queries::BRANCH_ISSUE,
                json!({ "branch": branch }),
            )
            .await?;
        Ok(data.and_then(|d| d.issue_vcs_branch_search))
    }

    async fn fetch_favorites(&self) -> Result<Vec<Favorite>, GatewayError> {
        let data: Option<FavoritesData> = self
            .request("Favorites", queries::FAVORITES, json!({}))
            .await?;
        let mut favorites = data.map(|d| d.favorites.nodes).unwrap_or_default();
        favorites.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order));
        Ok(favorites)
    }

    async fn fetch_project(&self, id: &str) -> Result<Option<Project>, GatewayError> {
        let data: Option<ProjectData> = self
            .request("Project", queries::PROJECT, json!({ "id": id }))
            .await?;
        Ok(data.and_then(|d| d.project))
    }

    async fn fetch_milestone(&self, id: &str) -> Result<Option<Milestone>, GatewayError> {
        let data: Option<MilestoneData> = self
            .request("Milestone", queries::MILESTONE, json!({ "id": id }))
            .await?;
        Ok(data.and_then(|d| d.project_milestone))
    }

    async fn fetch_no_milestone_issues(
        &self,
        project_id: &str,
    ) -> Result<Vec<Issue>, GatewayError> {
        let data: Option<IssuesData> = self
            .request(
                "NoMilestone",
                queries::NO_MILESTONE_ISSUES,
                json!({ "id": project_id }),
            )
            .await?;
        Ok(data.map(|d| d.issues.nodes).unwrap_or_default())
    }

    async fn fetch_cycle_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError> {
        let data: Option<CycleIssuesData> = self
            .request("CycleIssues", queries::CYCLE_ISSUES, json!({ "id": id }))
            .await?;
        Ok(data
            .and_then(|d| d.cycle)
            .map(|c| c.issues.nodes)
            .unwrap_or_default())
    }

    async fn fetch_label_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError> {
        let data: Option<LabelIssuesData> = self
            .request("LabelIssues", queries::LABEL_ISSUES, json!({ "id": id }))
            .await?;
        Ok(data
            .and_then(|d| d.issue_label)
            .map(|l| l.issues.nodes)
            .unwrap_or_default())
    }

    async fn fetch_custom_view_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError> {
        let data: Option<CustomViewIssuesData> = self
            .request(
                "CustomViewIssues",
                queries::CUSTOM_VIEW_ISSUES,
                json!({ "id": id }),
            )
            .await?;
        Ok(data
            .and_then(|d| d.custom_view)
            .map(|v| v.issues.nodes)
            .unwrap_or_default())
    }

    async fn fetch_custom_view_projects(&self, id: &str) -> Result<Vec<Project>, GatewayError> {
        let data: Option<CustomViewProjectsData> = self
            .request(
                "CustomViewProjects",
                queries::CUSTOM_VIEW_PROJECTS,
                json!({ "id": id }),
            )
            .await?;
        Ok(data
            .and_then(|d| d.custom_view)
            .map(|v| v.projects.nodes)
            .unwrap_or_default())
    }

    async fn fetch_roadmap_projects(&self, id: &str) -> Result<Vec<Project>, GatewayError> {
        let data: Option<RoadmapProjectsData> = self
            .request(
                "RoadmapProjects",
                queries::ROADMAP_PROJECTS,
                json!({ "id": id }),
            )
            .await?;
        Ok(data
            .and_then(|d| d.roadmap)
            .map(|r| r.projects.nodes)
            .unwrap_or_default())
    }
}
