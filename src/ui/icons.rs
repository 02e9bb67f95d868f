//! Terminal glyphs for tree icons.
//!
//! Maps the codicon ids the presentation layer emits to emoji, with ASCII
//! fallbacks for terminals that cannot render them.

use console::{Emoji, Style};

use super::presentation::{Icon, ThemeColor};

// Structure
pub static BRANCH: Emoji<'_, '_> = Emoji("🌿 ", "* ");
pub static ACCOUNT: Emoji<'_, '_> = Emoji("👤 ", "@ ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "+ ");
pub static PROJECT: Emoji<'_, '_> = Emoji("📦 ", "# ");
pub static CYCLE: Emoji<'_, '_> = Emoji("🔁 ", "~ ");
pub static VIEW: Emoji<'_, '_> = Emoji("🔎 ", "= ");
pub static ROADMAP: Emoji<'_, '_> = Emoji("🗺️  ", "^ ");

// Issue state
pub static DONE: Emoji<'_, '_> = Emoji("● ", "[x] ");
pub static STARTED: Emoji<'_, '_> = Emoji("◐ ", "[~] ");
pub static TODO: Emoji<'_, '_> = Emoji("○ ", "[ ] ");
pub static CANCELED: Emoji<'_, '_> = Emoji("⊘ ", "[-] ");

// Attachments
pub static PULL_REQUEST: Emoji<'_, '_> = Emoji("🔀 ", "PR ");
pub static COMMIT: Emoji<'_, '_> = Emoji("📌 ", "c ");
pub static DESIGN: Emoji<'_, '_> = Emoji("🎨 ", "d ");
pub static DISCUSSION: Emoji<'_, '_> = Emoji("💬 ", "s ");
pub static FILE: Emoji<'_, '_> = Emoji("📄 ", "- ");

// Status
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

pub fn glyph(icon: Option<&Icon>) -> Emoji<'static, 'static> {
    let id = match icon {
        None => return Emoji("", ""),
        Some(Icon::Url(_)) => return ACCOUNT,
        Some(Icon::Theme { id, .. }) => *id,
    };
    match id {
        "git-branch" => BRANCH,
        "account" => ACCOUNT,
        "folder" => FOLDER,
        "archive" => PROJECT,
        "play-circle" => CYCLE,
        "list-filter" => VIEW,
        "milestone" => ROADMAP,
        "circle-large-filled" => DONE,
        "color-mode" => STARTED,
        "error" => CANCELED,
        "github" => PULL_REQUEST,
        "git-commit" => COMMIT,
        "symbol-color" => DESIGN,
        "comment-discussion" => DISCUSSION,
        "file" => FILE,
        _ => TODO,
    }
}

/// Terminal style for an icon's theme colour.
pub fn style(icon: Option<&Icon>) -> Style {
    let color = match icon {
        Some(Icon::Theme { color: Some(c), .. }) => *c,
        _ => return Style::new(),
    };
    match color {
        ThemeColor::IssueDone => Style::new().blue(),
        ThemeColor::IssueReadyToMerge => Style::new().green(),
        ThemeColor::IssueInReview => Style::new().cyan(),
        ThemeColor::IssueInProgress => Style::new().yellow(),
        ThemeColor::IssueBacklog => Style::new().dim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(id: &'static str) -> Icon {
        Icon::Theme { id, color: None }
    }

    #[test]
    fn test_known_icons_have_distinct_glyphs() {
        assert_eq!(glyph(Some(&theme("git-branch"))).to_string(), BRANCH.to_string());
        assert_eq!(glyph(Some(&theme("github"))).to_string(), PULL_REQUEST.to_string());
        assert_eq!(glyph(Some(&theme("error"))).to_string(), CANCELED.to_string());
    }

    #[test]
    fn test_avatar_uses_account_glyph() {
        let avatar = Icon::Url("https://img/a.png".to_string());
        assert_eq!(glyph(Some(&avatar)).to_string(), ACCOUNT.to_string());
    }

    #[test]
    fn test_no_icon_is_empty() {
        assert_eq!(glyph(None).to_string(), "");
    }

    #[test]
    fn test_unknown_icon_falls_back_to_outline() {
        assert_eq!(
            glyph(Some(&theme("circle-large-outline"))).to_string(),
            TODO.to_string()
        );
    }
}
