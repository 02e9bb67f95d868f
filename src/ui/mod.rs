pub mod icons;
pub mod markdown;
pub mod presentation;
pub mod render;

pub use markdown::sanitize_markdown;
pub use presentation::{Collapsible, Decoration, Icon, ThemeColor, TreeItem, tree_item};
pub use render::{RenderOptions, TreeView, render_tree};
