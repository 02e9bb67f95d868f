//! Plain terminal rendering of the tree.

use console::style;
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use tracing::debug;

use super::icons;
use super::presentation::{Collapsible, TreeItem};
use crate::errors::GatewayError;
use crate::tree::{Node, NodeAddress, RefreshEvent, TreeProvider};

/// How far to expand nodes that start collapsed. Nodes presented as
/// expanded are always opened.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub depth: usize,
    pub show_links: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            show_links: false,
        }
    }
}

/// Render the whole tree once. Failed subtrees are shown inline and do not
/// abort the render.
pub async fn render_tree(provider: &TreeProvider, options: RenderOptions) -> String {
    TreeView::new(options).render(provider).await
}

/// A tree kept on screen across redraws.
///
/// Resolved children are cached per [`NodeAddress`]. [`TreeView::apply`]
/// drops only the entries a [`RefreshEvent`] covers, so the next
/// [`TreeView::render`] re-requests children for the refreshed subtree and
/// reuses everything else. Failed fetches are not cached and are retried on
/// the next render.
#[derive(Debug, Default)]
pub struct TreeView {
    options: RenderOptions,
    roots: Option<Vec<Node>>,
    children: HashMap<NodeAddress, Vec<Node>>,
    seen: HashSet<NodeAddress>,
}

impl TreeView {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Invalidate the cached children `event` makes stale.
    pub fn apply(&mut self, event: &RefreshEvent) {
        if *event == RefreshEvent::All {
            self.roots = None;
        }
        let before = self.children.len();
        self.children.retain(|address, _| !event.affects(address));
        debug!(
            ?event,
            dropped = before - self.children.len(),
            "invalidated cached children"
        );
    }

    pub async fn render(&mut self, provider: &TreeProvider) -> String {
        let mut out = String::new();
        if self.roots.is_none() {
            match provider.get_children(None).await {
                Ok(roots) => self.roots = Some(roots),
                Err(e) => {
                    let _ = writeln!(out, "{}{}", icons::WARNING, style(e).red());
                    return out;
                }
            }
        }
        let roots = self.roots.clone().unwrap_or_default();

        self.seen.clear();
        for root in &roots {
            self.render_node(provider, root, 0, String::new(), None, &mut out)
                .await;
        }
        // Forget subtrees that were collapsed or have disappeared.
        let seen = std::mem::take(&mut self.seen);
        self.children.retain(|address, _| seen.contains(address));
        out
    }

    async fn children_of(
        &mut self,
        provider: &TreeProvider,
        node: &Node,
    ) -> Result<Vec<Node>, GatewayError> {
        let address = node.address();
        self.seen.insert(address.clone());
        if let Some(children) = self.children.get(&address) {
            return Ok(children.clone());
        }
        let children = provider.get_children(Some(node)).await?;
        self.children.insert(address, children.clone());
        Ok(children)
    }

    fn render_node<'a>(
        &'a mut self,
        provider: &'a TreeProvider,
        node: &'a Node,
        depth: usize,
        prefix: String,
        is_last: Option<bool>,
        out: &'a mut String,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let options = self.options;
            let item = provider.get_tree_item(node);
            let connector = match is_last {
                None => "",
                Some(true) => "└── ",
                Some(false) => "├── ",
            };
            let _ = writeln!(out, "{}{}{}", prefix, connector, format_item(&item, options));

            let expand = match item.collapsible {
                Collapsible::None => false,
                Collapsible::Expanded => true,
                Collapsible::Collapsed => depth < options.depth,
            };
            if !expand {
                return;
            }

            let child_prefix = match is_last {
                None => prefix,
                Some(true) => format!("{}    ", prefix),
                Some(false) => format!("{}│   ", prefix),
            };
            match self.children_of(provider, node).await {
                Ok(children) => {
                    let count = children.len();
                    for (i, child) in children.iter().enumerate() {
                        self.render_node(
                            provider,
                            child,
                            depth + 1,
                            child_prefix.clone(),
                            Some(i + 1 == count),
                            out,
                        )
                        .await;
                    }
                }
                Err(e) => {
                    let _ = writeln!(
                        out,
                        "{}└── {}{}",
                        child_prefix,
                        icons::WARNING,
                        style(format!("Failed to load: {}", e)).red()
                    );
                }
            }
        })
    }
}

/// One line of output for `item`, without tree connectors.
pub fn format_item(item: &TreeItem, options: RenderOptions) -> String {
    let glyph = icons::glyph(item.icon.as_ref());
    let mut line = format!(
        "{}{}",
        icons::style(item.icon.as_ref()).apply_to(glyph),
        item.label
    );
    if let Some(description) = &item.description {
        let _ = write!(line, " {}", style(description).dim());
    }
    if let Some(decoration) = &item.decoration {
        let _ = write!(line, " {} {}", decoration.badge, decoration.tooltip);
    }
    if options.show_links
        && let Some(link) = &item.link
    {
        let _ = write!(line, " {}", style(link).underlined());
    }
    line
}
