//! Open a Linear or attachment URL — `lintree open`.

use anyhow::{Context, Result, bail};
use regex::Regex;
use std::sync::LazyLock;

/// Issue identifiers such as `ENG-123`: 2-4 capitals, a hyphen, 1-5 digits.
static ISSUE_IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}-\d{1,5}$").unwrap());

/// Resolve what the user typed into a URL to open.
pub fn resolve_target(target: &str) -> Result<String> {
    let target = target.trim();
    if ISSUE_IDENTIFIER_REGEX.is_match(target) {
        return Ok(format!("https://linear.app/issue/{}", target));
    }
    if target.starts_with("https://") || target.starts_with("http://") {
        return Ok(target.to_string());
    }
    bail!(
        "'{}' is neither a URL nor an issue identifier like ENG-123",
        target
    )
}

pub fn cmd_open(target: &str) -> Result<()> {
    let url = resolve_target(target)?;
    open::that(&url).with_context(|| format!("Failed to open {}", url))?;
    println!("Opened {}", url);
    Ok(())
}
