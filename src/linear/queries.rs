//! GraphQL documents sent to Linear.
//!
//! Documents are assembled at compile time from shared field fragments so
//! that every query producing a projection selects the same fields. The
//! resolver sorts on `sortOrder` and branches on state type, attachment
//! source/metadata and favorite type/parent; a query that drops one of those
//! fields is a bug, which the tests below guard against.

macro_rules! issue_fields {
    () => {
        "id title url identifier branchName description sortOrder \
         assignee { displayName } \
         state { type name } \
         attachments { nodes { id title url sourceType metadata } }"
    };
}

macro_rules! active_state_filter {
    () => {
        "state: { type: { in: [\"triage\", \"backlog\", \"unstarted\", \"started\"] } }"
    };
}

macro_rules! project_fields {
    () => {
        "id name url progress sortOrder projectMilestones { nodes { id } }"
    };
}

macro_rules! milestone_fields {
    () => {
        concat!(
            "id name sortOrder issues(filter: { ",
            active_state_filter!(),
            " }) { nodes { ",
            issue_fields!(),
            " } }"
        )
    };
}

macro_rules! cycle_fields {
    () => {
        "id name number"
    };
}

pub const ISSUE_FIELDS: &str = issue_fields!();
pub const PROJECT_FIELDS: &str = project_fields!();
pub const MILESTONE_FIELDS: &str = milestone_fields!();

pub const VIEWER: &str = "query Viewer { viewer { id name displayName avatarUrl } }";

pub const MY_ISSUES: &str = concat!(
    "query MyIssues { viewer { assignedIssues(filter: { ",
    active_state_filter!(),
    " }) { nodes { ",
    issue_fields!(),
    " } } } }"
);

pub const BRANCH_ISSUE: &str = concat!(
    "query BranchIssue($branch: String!) { issueVcsBranchSearch(branchName: $branch) { ",
    issue_fields!(),
    " } }"
);

pub const FAVORITES: &str = concat!(
    "query Favorites { favorites { nodes { ",
    "id sortOrder type folderName parent { id } predefinedViewType ",
    "predefinedViewTeam { id activeCycle { ",
    cycle_fields!(),
    " } } ",
    "issue { ",
    issue_fields!(),
    " } ",
    "project { ",
    project_fields!(),
    " } ",
    "cycle { ",
    cycle_fields!(),
    " } ",
    "label { id name } ",
    "customView { id name modelName } ",
    "roadmap { id name } ",
    "} } }"
);

pub const PROJECT: &str = concat!(
    "query Project($id: String!) { project(id: $id) { ",
    project_fields!(),
    " } }"
);

pub const MILESTONE: &str = concat!(
    "query Milestone($id: String!) { projectMilestone(id: $id) { ",
    milestone_fields!(),
    " } }"
);

pub const NO_MILESTONE_ISSUES: &str = concat!(
    "query NoMilestone($id: ID!) { issues(filter: { ",
    active_state_filter!(),
    ", project: { id: { eq: $id } }, projectMilestone: { null: true } }) { nodes { ",
    issue_fields!(),
    " } } }"
);

pub const CYCLE_ISSUES: &str = concat!(
    "query CycleIssues($id: String!) { cycle(id: $id) { issues { nodes { ",
    issue_fields!(),
    " } } } }"
);

pub const LABEL_ISSUES: &str = concat!(
    "query LabelIssues($id: String!) { issueLabel(id: $id) { issues { nodes { ",
    issue_fields!(),
    " } } } }"
);

pub const CUSTOM_VIEW_ISSUES: &str = concat!(
    "query CustomViewIssues($id: String!) { customView(id: $id) { issues { nodes { ",
    issue_fields!(),
    " } } } }"
);

pub const CUSTOM_VIEW_PROJECTS: &str = concat!(
    "query CustomViewProjects($id: String!) { customView(id: $id) { projects { nodes { ",
    project_fields!(),
    " } } } }"
);

pub const ROADMAP_PROJECTS: &str = concat!(
    "query RoadmapProjects($id: String!) { roadmap(id: $id) { projects { nodes { ",
    project_fields!(),
    " } } } }"
);
