//! In-memory test doubles and entity builders shared by unit tests.

use anyhow::{Result, bail};
use async_trait::async_trait;
use lintree_common::{
    Attachment, AttachmentMetadata, Connection, CustomView, Cycle, Favorite, FavoriteRef,
    FavoriteType, Issue, Milestone, MilestoneRef, Project, Roadmap, SourceType, StateType, Team,
    User, WorkflowState,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::errors::GatewayError;
use crate::linear::Gateway;
use crate::tracker::VersionControl;

// ── builders ─────────────────────────────────────────────────────────

pub fn issue(id: &str, sort_order: f64) -> Issue {
    Issue {
        id: id.to_string(),
        title: format!("Issue {}", id),
        url: format!("https://linear.app/acme/issue/ENG-{}", id),
        identifier: format!("ENG-{}", id),
        branch_name: format!("eng-{}", id),
        description: None,
        sort_order,
        assignee: None,
        state: WorkflowState {
            state_type: StateType::Unstarted,
            name: "Todo".to_string(),
        },
        attachments: Connection::default(),
    }
}

pub fn attachment(id: &str) -> Attachment {
    Attachment {
        id: id.to_string(),
        title: format!("Attachment {}", id),
        url: format!("https://example.com/{}", id),
        source_type: SourceType::Other,
        metadata: AttachmentMetadata::default(),
    }
}

pub fn project(id: &str, sort_order: f64, milestone_ids: &[&str]) -> Project {
    Project {
        id: id.to_string(),
        name: format!("Project {}", id),
        url: format!("https://linear.app/acme/project/{}", id),
        progress: 0.5,
        sort_order,
        project_milestones: Connection {
            nodes: milestone_ids
                .iter()
                .map(|m| MilestoneRef { id: m.to_string() })
                .collect(),
        },
    }
}

pub fn milestone(id: &str, sort_order: f64, issues: Vec<Issue>) -> Milestone {
    Milestone {
        id: id.to_string(),
        name: format!("Milestone {}", id),
        sort_order,
        issues: Connection { nodes: issues },
    }
}

pub fn cycle(id: &str) -> Cycle {
    Cycle {
        id: id.to_string(),
        name: None,
        number: 7.0,
    }
}

pub fn custom_view(id: &str, model_name: &str) -> CustomView {
    CustomView {
        id: id.to_string(),
        name: format!("View {}", id),
        model_name: model_name.to_string(),
    }
}

pub fn roadmap(id: &str) -> Roadmap {
    Roadmap {
        id: id.to_string(),
        name: format!("Roadmap {}", id),
    }
}

pub fn viewer() -> User {
    User {
        id: "u1".to_string(),
        name: "Ada Lovelace".to_string(),
        display_name: Some("ada".to_string()),
        avatar_url: None,
    }
}

fn favorite(id: &str, favorite_type: FavoriteType, sort_order: f64) -> Favorite {
    Favorite {
        id: id.to_string(),
        sort_order,
        favorite_type,
        folder_name: None,
        parent: None,
        predefined_view_type: None,
        predefined_view_team: None,
        issue: None,
        project: None,
        cycle: None,
        label: None,
        custom_view: None,
        roadmap: None,
    }
}

pub fn folder_favorite(id: &str, name: &str, sort_order: f64) -> Favorite {
    Favorite {
        folder_name: Some(name.to_string()),
        ..favorite(id, FavoriteType::Folder, sort_order)
    }
}

pub fn issue_favorite(id: &str, issue: Issue, sort_order: f64) -> Favorite {
    Favorite {
        issue: Some(issue),
        ..favorite(id, FavoriteType::Issue, sort_order)
    }
}

pub fn project_favorite(id: &str, project: Project, sort_order: f64) -> Favorite {
    Favorite {
        project: Some(project),
        ..favorite(id, FavoriteType::Project, sort_order)
    }
}

pub fn active_cycle_favorite(id: &str, active: Cycle, sort_order: f64) -> Favorite {
    Favorite {
        predefined_view_type: Some("activeCycle".to_string()),
        predefined_view_team: Some(Team {
            id: "t1".to_string(),
            active_cycle: Some(active),
        }),
        ..favorite(id, FavoriteType::PredefinedView, sort_order)
    }
}

pub fn custom_view_favorite(id: &str, view_id: &str, model: &str, sort_order: f64) -> Favorite {
    Favorite {
        custom_view: Some(custom_view(view_id, model)),
        ..favorite(id, FavoriteType::CustomView, sort_order)
    }
}

pub fn cycle_favorite(id: &str, cycle: Cycle, sort_order: f64) -> Favorite {
    Favorite {
        cycle: Some(cycle),
        ..favorite(id, FavoriteType::Cycle, sort_order)
    }
}

pub fn roadmap_favorite(id: &str, roadmap_id: &str, sort_order: f64) -> Favorite {
    Favorite {
        roadmap: Some(roadmap(roadmap_id)),
        ..favorite(id, FavoriteType::Roadmap, sort_order)
    }
}

pub fn unknown_favorite(id: &str, sort_order: f64) -> Favorite {
    favorite(id, FavoriteType::Unknown, sort_order)
}

pub trait FavoriteExt {
    fn in_folder(self, folder_id: &str) -> Favorite;
}

impl FavoriteExt for Favorite {
    fn in_folder(self, folder_id: &str) -> Favorite {
        Favorite {
            parent: Some(FavoriteRef {
                id: folder_id.to_string(),
            }),
            ..self
        }
    }
}

// ── gateway ──────────────────────────────────────────────────────────

/// Shared record of gateway calls, by method name.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn record(&self, operation: &str) {
        self.0.lock().unwrap().push(operation.to_string());
    }

    pub fn count(&self, operation: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|c| *c == operation).count()
    }

    pub fn total(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[derive(Debug, Default)]
struct GatewayData {
    viewer: Option<User>,
    my_issues: Vec<Issue>,
    branch_issues: HashMap<String, Issue>,
    favorites: Vec<Favorite>,
    projects: HashMap<String, Project>,
    milestones: HashMap<String, Milestone>,
    no_milestone_issues: HashMap<String, Vec<Issue>>,
    cycle_issues: HashMap<String, Vec<Issue>>,
    label_issues: HashMap<String, Vec<Issue>>,
    custom_view_issues: HashMap<String, Vec<Issue>>,
    custom_view_projects: HashMap<String, Vec<Project>>,
    roadmap_projects: HashMap<String, Vec<Project>>,
    failing: HashSet<String>,
}

/// Gateway double answering from in-memory data.
#[derive(Debug, Default)]
pub struct MockGateway {
    data: Mutex<GatewayData>,
    calls: CallLog,
}

impl MockGateway {
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }

    fn update(self, f: impl FnOnce(&mut GatewayData)) -> Self {
        f(&mut self.data.lock().unwrap());
        self
    }

    pub fn with_viewer(self, user: User) -> Self {
        self.update(|d| d.viewer = Some(user))
    }

    pub fn with_my_issues(self, issues: Vec<Issue>) -> Self {
        self.update(|d| d.my_issues = issues)
    }

    pub fn with_branch_issue(self, branch: &str, issue: Issue) -> Self {
        self.update(|d| {
            d.branch_issues.insert(branch.to_string(), issue);
        })
    }

    pub fn with_favorites(self, favorites: Vec<Favorite>) -> Self {
        self.update(|d| d.favorites = favorites)
    }

    pub fn with_project(self, project: Project) -> Self {
        self.update(|d| {
            d.projects.insert(project.id.clone(), project);
        })
    }

    pub fn with_milestone(self, milestone: Milestone) -> Self {
        self.update(|d| {
            d.milestones.insert(milestone.id.clone(), milestone);
        })
    }

    pub fn with_no_milestone_issues(self, project_id: &str, issues: Vec<Issue>) -> Self {
        self.update(|d| {
            d.no_milestone_issues.insert(project_id.to_string(), issues);
        })
    }

    pub fn with_cycle_issues(self, id: &str, issues: Vec<Issue>) -> Self {
        self.update(|d| {
            d.cycle_issues.insert(id.to_string(), issues);
        })
    }

    pub fn with_custom_view_issues(self, id: &str, issues: Vec<Issue>) -> Self {
        self.update(|d| {
            d.custom_view_issues.insert(id.to_string(), issues);
        })
    }

    pub fn with_roadmap_projects(self, id: &str, projects: Vec<Project>) -> Self {
        self.update(|d| {
            d.roadmap_projects.insert(id.to_string(), projects);
        })
    }

    /// Make `operation` fail with a GraphQL error.
    pub fn failing(self, operation: &str) -> Self {
        self.update(|d| {
            d.failing.insert(operation.to_string());
        })
    }

    /// Replace the issue returned for `branch` while the gateway is in use.
    pub fn set_branch_issue(&self, branch: &str, issue: Issue) {
        self.data
            .lock()
            .unwrap()
            .branch_issues
            .insert(branch.to_string(), issue);
    }

    fn answer<T>(
        &self,
        operation: &str,
        f: impl FnOnce(&GatewayData) -> T,
    ) -> Result<T, GatewayError> {
        self.calls.record(operation);
        let data = self.data.lock().unwrap();
        if data.failing.contains(operation) {
            return Err(GatewayError::GraphQl {
                operation: operation.to_string(),
                messages: vec!["injected failure".to_string()],
            });
        }
        Ok(f(&data))
    }
}

fn listed<T: Clone>(map: &HashMap<String, Vec<T>>, id: &str) -> Vec<T> {
    map.get(id).cloned().unwrap_or_default()
}

#[async_trait]
impl Gateway for MockGateway {
    async fn fetch_viewer(&self) -> Result<Option<User>, GatewayError> {
        self.answer("fetch_viewer", |d| d.viewer.clone())
    }

    async fn fetch_my_issues(&self) -> Result<Vec<Issue>, GatewayError> {
        self.answer("fetch_my_issues", |d| d.my_issues.clone())
    }

    async fn fetch_branch_issue(&self, branch: &str) -> Result<Option<Issue>, GatewayError> {
        self.answer("fetch_branch_issue", |d| d.branch_issues.get(branch).cloned())
    }

    async fn fetch_favorites(&self) -> Result<Vec<Favorite>, GatewayError> {
        self.answer("fetch_favorites", |d| d.favorites.clone())
    }

    async fn fetch_project(&self, id: &str) -> Result<Option<Project>, GatewayError> {
        self.answer("fetch_project", |d| d.projects.get(id).cloned())
    }

    async fn fetch_milestone(&self, id: &str) -> Result<Option<Milestone>, GatewayError> {
        self.answer("fetch_milestone", |d| d.milestones.get(id).cloned())
    }

    async fn fetch_no_milestone_issues(&self, project_id: &str) -> Result<Vec<Issue>, GatewayError> {
        self.answer("fetch_no_milestone_issues", |d| {
            listed(&d.no_milestone_issues, project_id)
        })
    }

    async fn fetch_cycle_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError> {
        self.answer("fetch_cycle_issues", |d| listed(&d.cycle_issues, id))
    }

    async fn fetch_label_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError> {
        self.answer("fetch_label_issues", |d| listed(&d.label_issues, id))
    }

    async fn fetch_custom_view_issues(&self, id: &str) -> Result<Vec<Issue>, GatewayError> {
        self.answer("fetch_custom_view_issues", |d| {
            listed(&d.custom_view_issues, id)
        })
    }

    async fn fetch_custom_view_projects(&self, id: &str) -> Result<Vec<Project>, GatewayError> {
        self.answer("fetch_custom_view_projects", |d| {
            listed(&d.custom_view_projects, id)
        })
    }

    async fn fetch_roadmap_projects(&self, id: &str) -> Result<Vec<Project>, GatewayError> {
        self.answer("fetch_roadmap_projects", |d| listed(&d.roadmap_projects, id))
    }
}

// ── version control ──────────────────────────────────────────────────

#[derive(Debug, Default)]
struct VcsState {
    current: Option<String>,
    branches: HashSet<String>,
    operations: Vec<String>,
    unavailable: bool,
}

/// Version-control double with an in-memory branch set.
#[derive(Debug, Default)]
pub struct MockVcs {
    state: Mutex<VcsState>,
}

impl MockVcs {
    pub fn on_branch(name: &str) -> Self {
        let vcs = Self::default();
        {
            let mut state = vcs.state.lock().unwrap();
            state.current = Some(name.to_string());
            state.branches.insert(name.to_string());
        }
        vcs
    }

    pub fn with_branches(self, names: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .branches
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn unavailable(self) -> Self {
        self.state.lock().unwrap().unavailable = true;
        self
    }

    /// Simulate the user switching branches outside the tool.
    pub fn set_branch(&self, name: Option<&str>) {
        self.state.lock().unwrap().current = name.map(str::to_string);
    }

    pub fn operations(&self) -> Vec<String> {
        self.state.lock().unwrap().operations.clone()
    }
}

impl VersionControl for MockVcs {
    fn current_branch_name(&self) -> Option<String> {
        self.state.lock().unwrap().current.clone()
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            bail!("repository unavailable");
        }
        Ok(state.branches.contains(name))
    }

    fn checkout(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.branches.contains(name) {
            bail!("branch {} not found", name);
        }
        state.current = Some(name.to_string());
        state.operations.push(format!("checkout {}", name));
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.branches.insert(name.to_string()) {
            bail!("branch {} already exists", name);
        }
        state.current = Some(name.to_string());
        state.operations.push(format!("create {}", name));
        Ok(())
    }
}
