//! Child Resolver.
//!
//! Maps a node to its ordered children, dispatching on the node kind. Every
//! call re-fetches from the gateway except where the parent projection
//! already embeds the data (milestone issues, issue attachments, folder
//! members). Fetch failures propagate unmodified; only the "git has no branch
//! yet" case schedules a retry, through the Refresh Bus.

use futures::future::try_join_all;
use lintree_common::{Favorite, FavoriteType, Issue, Milestone, Project};
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

use super::bus::RefreshBus;
use super::node::{Node, NodeKind, sentinel};
use crate::config::TreeConfig;
use crate::errors::GatewayError;
use crate::linear::Gateway;
use crate::tracker::VersionControl;

pub const LOADING_BRANCH: &str = "Loading current branch...";
pub const NO_BRANCH_ISSUE: &str = "No matching Linear issue for branch";
pub const NO_ISSUES: &str = "No issues";
pub const NO_PROJECTS: &str = "No projects";
pub const PROJECT_VIEWS_UNSUPPORTED: &str = "Custom view for projects not supported yet";

const ACTIVE_CYCLE_VIEW: &str = "activeCycle";

/// Last branch name the current-branch node was resolved against.
///
/// Written only by current-branch resolution, read by the branch poller.
#[derive(Debug, Clone, Default)]
pub struct BranchMemo(Arc<RwLock<Option<String>>>);

impl BranchMemo {
    pub fn get(&self) -> Option<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, branch: &str) {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        if guard.as_deref() != Some(branch) {
            *guard = Some(branch.to_string());
        }
    }
}

pub struct ChildResolver {
    gateway: Arc<dyn Gateway>,
    vcs: Arc<dyn VersionControl>,
    bus: RefreshBus,
    branch: BranchMemo,
    config: TreeConfig,
}

impl ChildResolver {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        vcs: Arc<dyn VersionControl>,
        bus: RefreshBus,
        config: TreeConfig,
    ) -> Self {
        Self {
            gateway,
            vcs,
            bus,
            branch: BranchMemo::default(),
            config,
        }
    }

    pub fn branch_memo(&self) -> &BranchMemo {
        &self.branch
    }

    /// Resolve the children of `node`, or the root set when `node` is `None`.
    pub async fn resolve(&self, node: Option<&Node>) -> Result<Vec<Node>, GatewayError> {
        let Some(node) = node else {
            debug!("resolving root");
            return self.root().await;
        };
        debug!(kind = %node.tag(), address = %node.address(), "resolving children");
        self.resolve_node(node).await.inspect_err(|e| {
            warn!(kind = %node.tag(), address = %node.address(), error = %e, "child resolution failed");
        })
    }

    async fn root(&self) -> Result<Vec<Node>, GatewayError> {
        let viewer = self.gateway.fetch_viewer().await?;
        Ok(vec![
            Node::from_kind(None, NodeKind::CurrentBranch),
            Node::from_kind(None, NodeKind::MyIssues { viewer }),
            Node::from_kind(None, NodeKind::Favorites),
        ])
    }

    async fn resolve_node(&self, node: &Node) -> Result<Vec<Node>, GatewayError> {
        match &node.kind {
            NodeKind::CurrentBranch => self.current_branch(node).await,
            NodeKind::MyIssues { .. } => {
                let issues = self.gateway.fetch_my_issues().await?;
                Ok(issue_list(issues, node))
            }
            NodeKind::Favorites => {
                let favorites = self.gateway.fetch_favorites().await?;
                Ok(favorite_nodes(favorites, node))
            }
            NodeKind::FavoriteFolder { children, .. } => Ok(favorite_nodes(children.clone(), node)),
            NodeKind::Issue { issue } => Ok(issue
                .attachments
                .nodes
                .iter()
                .map(|attachment| {
                    Node::from_kind(
                        Some(node),
                        NodeKind::Attachment {
                            attachment: attachment.clone(),
                        },
                    )
                })
                .collect()),
            NodeKind::Project { project } => self.project(project, node).await,
            NodeKind::Milestone { milestone } => Ok(issue_list(milestone.issues.nodes.clone(), node)),
            NodeKind::NoMilestone { project } => {
                let issues = self.gateway.fetch_no_milestone_issues(&project.id).await?;
                Ok(issue_list(issues, node))
            }
            NodeKind::Cycle { cycle } => {
                let issues = self.gateway.fetch_cycle_issues(&cycle.id).await?;
                Ok(issue_list(issues, node))
            }
            NodeKind::CustomView { custom_view } => {
                match custom_view.model_name.to_lowercase().as_str() {
                    "issue" => {
                        let issues = self.gateway.fetch_custom_view_issues(&custom_view.id).await?;
                        Ok(issue_list(issues, node))
                    }
                    "project" => Ok(vec![Node::message(
                        sentinel::UNSUPPORTED,
                        PROJECT_VIEWS_UNSUPPORTED,
                        node,
                    )]),
                    _ => Ok(Vec::new()),
                }
            }
            NodeKind::Roadmap { roadmap } => {
                let projects = self.gateway.fetch_roadmap_projects(&roadmap.id).await?;
                Ok(project_list(projects, node))
            }
            NodeKind::Attachment { .. } | NodeKind::Message { .. } => Ok(Vec::new()),
        }
    }

    async fn current_branch(&self, node: &Node) -> Result<Vec<Node>, GatewayError> {
        let Some(branch) = self.vcs.current_branch_name() else {
            // Git is not ready yet: show a placeholder and poll again.
            self.bus
                .schedule(node.address(), self.config.branch_retry_delay);
            return Ok(vec![Node::message(sentinel::LOADING, LOADING_BRANCH, node)]);
        };

        self.branch.set(&branch);
        match self.gateway.fetch_branch_issue(&branch).await? {
            Some(issue) => Ok(vec![Node::from_kind(Some(node), NodeKind::Issue { issue })]),
            None => Ok(vec![Node::message(
                sentinel::NO_BRANCH_ISSUE,
                NO_BRANCH_ISSUE,
                node,
            )]),
        }
    }

    async fn project(&self, project: &Project, node: &Node) -> Result<Vec<Node>, GatewayError> {
        let fetches = project
            .milestone_ids()
            .map(|id| self.gateway.fetch_milestone(id));
        let mut milestones: Vec<Milestone> = try_join_all(fetches).await?.into_iter().flatten().collect();
        milestones.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order));

        let mut children: Vec<Node> = milestones
            .into_iter()
            .map(|milestone| Node::from_kind(Some(node), NodeKind::Milestone { milestone }))
            .collect();
        children.push(Node::from_kind(
            Some(node),
            NodeKind::NoMilestone {
                project: project.clone(),
            },
        ));
        Ok(children)
    }
}

/// Issues ordered by ascending `sortOrder` (stable), or a "No issues" leaf.
pub fn issue_list(mut issues: Vec<Issue>, parent: &Node) -> Vec<Node> {
    if issues.is_empty() {
        return vec![Node::message(sentinel::NO_ISSUES, NO_ISSUES, parent)];
    }
    issues.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order));
    issues
        .into_iter()
        .map(|issue| Node::from_kind(Some(parent), NodeKind::Issue { issue }))
        .collect()
}

/// Projects ordered by ascending `sortOrder` (stable), or a "No projects" leaf.
pub fn project_list(mut projects: Vec<Project>, parent: &Node) -> Vec<Node> {
    if projects.is_empty() {
        return vec![Node::message(sentinel::NO_PROJECTS, NO_PROJECTS, parent)];
    }
    projects.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order));
    projects
        .into_iter()
        .map(|project| Node::from_kind(Some(parent), NodeKind::Project { project }))
        .collect()
}

/// Map favorites to nodes in two passes: split off members of folders, then
/// emit top-level favorites with each folder carrying its members (parent
/// reference cleared). Only one level of folder nesting exists.
///
/// Two favorites can point at the same entity (the team's active cycle and
/// that cycle pinned directly). Siblings must have distinct `uri`s, so only
/// the first in `sortOrder` is kept.
pub fn favorite_nodes(mut favorites: Vec<Favorite>, parent: &Node) -> Vec<Node> {
    favorites.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order));
    let (top_level, nested): (Vec<Favorite>, Vec<Favorite>) =
        favorites.into_iter().partition(|f| f.parent.is_none());

    let mut seen = HashSet::new();
    top_level
        .into_iter()
        .filter_map(|favorite| favorite_node(favorite, &nested, parent))
        .filter(|node| {
            let fresh = seen.insert(node.uri.clone());
            if !fresh {
                debug!(uri = %node.uri, "dropping duplicate favorite");
            }
            fresh
        })
        .collect()
}

fn favorite_node(favorite: Favorite, nested: &[Favorite], parent: &Node) -> Option<Node> {
    let kind = match favorite.favorite_type {
        FavoriteType::Issue => NodeKind::Issue {
            issue: favorite.issue?,
        },
        FavoriteType::Project => NodeKind::Project {
            project: favorite.project?,
        },
        FavoriteType::PredefinedView => {
            if favorite.predefined_view_type.as_deref() != Some(ACTIVE_CYCLE_VIEW) {
                return None;
            }
            NodeKind::Cycle {
                cycle: favorite.predefined_view_team?.active_cycle?,
            }
        }
        FavoriteType::CustomView => NodeKind::CustomView {
            custom_view: favorite.custom_view?,
        },
        FavoriteType::Cycle => NodeKind::Cycle {
            cycle: favorite.cycle?,
        },
        FavoriteType::Roadmap => NodeKind::Roadmap {
            roadmap: favorite.roadmap?,
        },
        FavoriteType::Folder => {
            let children = nested
                .iter()
                .filter(|member| member.parent_id() == Some(favorite.id.as_str()))
                .map(|member| Favorite {
                    parent: None,
                    ..member.clone()
                })
                .collect();
            let kind = NodeKind::FavoriteFolder {
                name: favorite.folder_name.unwrap_or_default(),
                children,
            };
            return Some(Node::new(favorite.id, Some(parent), kind));
        }
        FavoriteType::Unknown => return None,
    };
    Some(Node::from_kind(Some(parent), kind))
}
