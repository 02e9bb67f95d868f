//! Issue branch checkout — `lintree checkout <BRANCH>`.

use anyhow::Result;
use dialoguer::{Select, theme::ColorfulTheme};
use std::path::PathBuf;
use tracing::warn;

use lintree::tracker::{
    BaseBranchPicker, BaseChoice, CheckoutOutcome, GitTracker, checkout_issue_branch,
};
use lintree::ui::{RenderOptions, render_tree};

use super::super::Cli;
use super::{build_provider, load_config};

/// Asks for the base branch on the terminal. Esc cancels.
struct TerminalPicker;

impl BaseBranchPicker for TerminalPicker {
    fn pick(&self, branch: &str, options: &[BaseChoice]) -> Option<BaseChoice> {
        let labels: Vec<String> = options
            .iter()
            .map(|choice| match choice {
                BaseChoice::Default(b) => format!("Default branch ({})", b),
                BaseChoice::Current(b) => format!("Current branch ({})", b),
            })
            .collect();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Branch {} does not exist. Create it from", branch))
            .items(&labels)
            .default(0)
            .interact_opt();

        match selection {
            Ok(Some(index)) => options.get(index).cloned(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "base branch prompt failed");
                None
            }
        }
    }
}

pub async fn cmd_checkout(cli: &Cli, project_dir: PathBuf, branch: &str) -> Result<()> {
    let config = load_config(cli, project_dir)?;
    let vcs = GitTracker::new(&config.project_dir)?;

    match checkout_issue_branch(&vcs, &TerminalPicker, branch, &config.default_branch)? {
        CheckoutOutcome::SwitchedToExisting => println!("Switched to branch {}", branch),
        CheckoutOutcome::Created { base } => {
            println!("Created branch {} from {}", branch, base)
        }
        CheckoutOutcome::Cancelled => {
            println!("Checkout cancelled.");
            return Ok(());
        }
    }

    // Show the refreshed tree for the new branch when Linear is reachable.
    if config.api_key.is_some() {
        let provider = build_provider(&config)?;
        println!();
        print!(
            "{}",
            render_tree(
                &provider,
                RenderOptions {
                    depth: 0,
                    show_links: false,
                }
            )
            .await
        );
    }
    Ok(())
}
