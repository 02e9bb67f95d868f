//! Presentation Adapter: maps a [`Node`] to the item a tree widget renders.
//!
//! Pure function of the node (plus the live branch name for the
//! current-branch root). No I/O; decorations are returned on the item rather
//! than pushed into a global registry.

use lintree_common::{Attachment, Issue, PullRequestStatus, SourceType, StateType};

use super::markdown::sanitize_markdown;
use crate::tree::node::{Node, NodeKind, NodeTag, full_address};

/// Named colour slots a host theme can map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    IssueDone,
    IssueReadyToMerge,
    IssueInReview,
    IssueInProgress,
    IssueBacklog,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Codicon id with an optional theme colour.
    Theme {
        id: &'static str,
        color: Option<ThemeColor>,
    },
    /// Remote image, e.g. the viewer's avatar.
    Url(String),
}

impl Icon {
    fn theme(id: &'static str) -> Self {
        Icon::Theme { id, color: None }
    }

    fn colored(id: &'static str, color: ThemeColor) -> Self {
        Icon::Theme {
            id,
            color: Some(color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapsible {
    None,
    Collapsed,
    Expanded,
}

/// Single-character badge shown beside a pull-request attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub badge: &'static str,
    pub tooltip: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    /// Full address of the node; stable across refreshes.
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub tooltip: Option<String>,
    pub icon: Option<Icon>,
    pub collapsible: Collapsible,
    pub link: Option<String>,
    pub decoration: Option<Decoration>,
}

impl TreeItem {
    fn new(node: &Node, label: impl Into<String>, collapsible: Collapsible) -> Self {
        Self {
            id: full_address(node),
            label: label.into(),
            description: None,
            tooltip: None,
            icon: None,
            collapsible,
            link: None,
            decoration: None,
        }
    }

    fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

pub fn tree_item(node: &Node, branch_name: Option<&str>) -> TreeItem {
    match &node.kind {
        NodeKind::CurrentBranch => TreeItem::new(
            node,
            branch_name.unwrap_or("Current branch"),
            Collapsible::Expanded,
        )
        .icon(Icon::theme("git-branch")),
        NodeKind::MyIssues { viewer } => {
            let icon = match viewer.as_ref().and_then(|v| v.avatar_url.clone()) {
                Some(url) => Icon::Url(url),
                None => Icon::theme("account"),
            };
            TreeItem::new(node, "My issues", Collapsible::Collapsed)
                .icon(icon)
        }
        NodeKind::Issue { issue } => issue_item(node, issue),
        NodeKind::Attachment { attachment } => attachment_item(node, attachment),
        NodeKind::Project { project } => {
            let percent = (project.progress * 100.0).round() as i64;
            TreeItem {
                link: Some(project.url.clone()),
                ..TreeItem::new(node, project.name.clone(), Collapsible::Collapsed)
                    .description(format!("{}%", percent))
                    .icon(Icon::theme("archive"))
            }
        }
        NodeKind::Milestone { milestone } => {
            TreeItem::new(node, milestone.name.clone(), Collapsible::Collapsed)
                .description(milestone.issues.len().to_string())
        }
        NodeKind::NoMilestone { .. } => {
            TreeItem::new(node, "No milestone", Collapsible::Collapsed)
        }
        NodeKind::Favorites => TreeItem::new(node, "Favorites", Collapsible::Expanded),
        NodeKind::FavoriteFolder { name, .. } => {
            let label = if name.is_empty() { "Folder" } else { name };
            TreeItem::new(node, label, Collapsible::Collapsed)
                .icon(Icon::theme("folder"))
        }
        NodeKind::Cycle { cycle } => {
            TreeItem::new(node, cycle.display_name(), Collapsible::Collapsed)
                .icon(Icon::theme("play-circle"))
        }
        NodeKind::CustomView { custom_view } => {
            TreeItem::new(node, custom_view.name.clone(), Collapsible::Collapsed)
                .icon(Icon::theme("list-filter"))
        }
        NodeKind::Roadmap { roadmap } => {
            TreeItem::new(node, roadmap.name.clone(), Collapsible::Collapsed)
                .icon(Icon::theme("milestone"))
        }
        NodeKind::Message { text } => TreeItem::new(node, text.clone(), Collapsible::None),
    }
}

fn issue_item(node: &Node, issue: &Issue) -> TreeItem {
    let collapsible = if issue.attachments.is_empty() {
        Collapsible::None
    } else if node.parent_tag() == Some(NodeTag::CurrentBranch) {
        Collapsible::Expanded
    } else {
        Collapsible::Collapsed
    };

    TreeItem {
        tooltip: Some(issue_tooltip(issue)),
        link: Some(issue.url.clone()),
        ..TreeItem::new(node, issue.title.clone(), collapsible)
            .description(issue.identifier.clone())
            .icon(issue_icon(issue))
    }
}

fn issue_tooltip(issue: &Issue) -> String {
    let status = [
        Some(issue.state.name.as_str()),
        issue.assignee.as_ref().map(|a| a.display_name.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" · ");

    let mut tooltip = format!("{}\n{}", issue.title, status);
    if let Some(description) = issue.description.as_deref()
        && !description.is_empty()
    {
        tooltip.push_str("\n----------\n");
        tooltip.push_str(&sanitize_markdown(description));
    }
    tooltip
}

fn issue_icon(issue: &Issue) -> Icon {
    match issue.state.state_type {
        StateType::Completed => Icon::colored("circle-large-filled", ThemeColor::IssueDone),
        StateType::Started => {
            let pull_request = issue.github_attachment();
            let color = if pull_request.is_some_and(|a| a.metadata.is_approved()) {
                ThemeColor::IssueReadyToMerge
            } else if pull_request.is_some_and(|a| a.metadata.status == Some(PullRequestStatus::InReview)) {
                ThemeColor::IssueInReview
            } else {
                ThemeColor::IssueInProgress
            };
            Icon::colored("color-mode", color)
        }
        StateType::Canceled => Icon::theme("error"),
        _ if issue.state.name == "Backlog" => {
            Icon::colored("circle-large-outline", ThemeColor::IssueBacklog)
        }
        _ => Icon::theme("circle-large-outline"),
    }
}

fn attachment_item(node: &Node, attachment: &Attachment) -> TreeItem {
    let item = TreeItem {
        link: Some(attachment.url.clone()),
        ..TreeItem::new(node, attachment.title.clone(), Collapsible::None)
    };
    match attachment.source_type {
        SourceType::Github => TreeItem {
            decoration: pull_request_decoration(attachment),
            ..item.description("GitHub").icon(Icon::theme("github"))
        },
        SourceType::GithubCommit => item.description("GitHub").icon(Icon::theme("git-commit")),
        SourceType::Figma => item.description("Figma").icon(Icon::theme("symbol-color")),
        SourceType::Slack => item
            .description("Slack")
            .icon(Icon::theme("comment-discussion")),
        SourceType::Other => item.icon(Icon::theme("file")),
    }
}

fn pull_request_decoration(attachment: &Attachment) -> Option<Decoration> {
    let status = attachment.metadata.status;
    if status == Some(PullRequestStatus::Merged) {
        return Some(Decoration {
            badge: "🚀",
            tooltip: "Merged",
        });
    }
    if attachment.metadata.is_approved() {
        return Some(Decoration {
            badge: "✅",
            tooltip: "Approved",
        });
    }
    match status {
        Some(PullRequestStatus::InReview) => Some(Decoration {
            badge: "⏳",
            tooltip: "In review",
        }),
        Some(PullRequestStatus::Closed) => Some(Decoration {
            badge: "❌",
            tooltip: "Closed",
        }),
        _ => None,
    }
}
