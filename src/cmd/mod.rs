//! CLI command implementations.
//!
//! | Module     | Commands handled |
//! |------------|------------------|
//! | `tree`     | `Tree`, `Watch`  |
//! | `checkout` | `Checkout`       |
//! | `open`     | `Open`           |
//! | `config`   | `Config`         |

pub mod checkout;
pub mod config;
pub mod open;
pub mod tree;

pub use checkout::cmd_checkout;
pub use config::cmd_config;
pub use open::cmd_open;
pub use tree::{cmd_tree, cmd_watch};

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use lintree::config::Config;
use lintree::linear::LinearClient;
use lintree::logging::{LogConfig, init_logging};
use lintree::state::StateManager;
use lintree::tracker::{GitTracker, VersionControl};
use lintree::tree::TreeProvider;

use super::Cli;

/// Load configuration and install logging for a command that talks to Linear.
pub fn load_config(cli: &Cli, project_dir: PathBuf) -> Result<Config> {
    let config = Config::new(project_dir, cli.verbose, cli.api_key.clone())?;
    config.ensure_directories()?;
    init_logging(&LogConfig::from_config(&config))?;
    Ok(config)
}

/// Build the tree provider over the Linear API and the project's git repo.
pub fn build_provider(config: &Config) -> Result<Arc<TreeProvider>> {
    let gateway = Arc::new(LinearClient::from_config(config)?);
    let vcs: Arc<dyn VersionControl> = Arc::new(GitTracker::lazy(&config.project_dir));
    Ok(Arc::new(TreeProvider::new(gateway, vcs, config.tree)))
}

/// Print the first-run hint once per project.
pub fn show_onboarding(config: &Config) -> Result<()> {
    let state = StateManager::new(config.state_file.clone());
    if state.take_onboarding()? {
        eprintln!("lintree shows the Linear issue for your current git branch, your");
        eprintln!("assigned issues and your favorites. Run `lintree watch` to keep it");
        eprintln!("up to date and `lintree checkout <branch>` to start on an issue.");
        eprintln!();
    }
    Ok(())
}
