use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::lintree_config::LintreeToml;

/// Poll intervals for the current-branch watchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    pub branch_interval: Duration,
    pub issue_interval: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            branch_interval: Duration::from_millis(1000),
            issue_interval: Duration::from_millis(5000),
        }
    }
}

/// Settings the tree provider and resolver need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Delay before the current branch node is re-resolved while git has no branch yet.
    pub branch_retry_delay: Duration,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            branch_retry_delay: Duration::from_millis(1000),
        }
    }
}

/// Runtime configuration for lintree.
///
/// Merges `.lintree/lintree.toml`, the environment and CLI flags into the
/// values the commands use.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub lintree_dir: PathBuf,
    pub state_file: PathBuf,
    pub log_dir: PathBuf,
    pub api_endpoint: String,
    pub api_key: Option<String>,
    pub token_env: String,
    pub tree: TreeConfig,
    pub polling: PollingConfig,
    pub default_branch: String,
    pub log_level: String,
    pub log_json: bool,
    pub verbose: bool,
    /// The underlying file configuration
    toml: LintreeToml,
}

impl Config {
    /// Load configuration for `project_dir`, reading the process environment.
    pub fn new(project_dir: PathBuf, verbose: bool, api_key: Option<String>) -> Result<Self> {
        Self::with_env(project_dir, verbose, api_key, |key| std::env::var(key).ok())
    }

    /// Load configuration with an explicit environment lookup.
    pub fn with_env(
        project_dir: PathBuf,
        verbose: bool,
        api_key: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let lintree_dir = project_dir.join(".lintree");
        let toml = LintreeToml::load_or_default(&lintree_dir)?;

        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| toml.api_key_with(&env));
        let api_endpoint = toml.endpoint_with(&env);
        let log_level = if verbose {
            "debug".to_string()
        } else {
            toml.logging.level.to_lowercase()
        };

        Ok(Self {
            state_file: lintree_dir.join("state.json"),
            log_dir: lintree_dir.join("logs"),
            lintree_dir,
            project_dir,
            api_endpoint,
            api_key,
            token_env: toml.api.token_env.clone(),
            tree: TreeConfig {
                branch_retry_delay: Duration::from_millis(toml.tree.branch_retry_ms),
            },
            polling: PollingConfig {
                branch_interval: Duration::from_millis(toml.polling.branch_interval_ms.max(1)),
                issue_interval: Duration::from_millis(toml.polling.issue_interval_ms.max(1)),
            },
            default_branch: toml.default_branch(),
            log_level,
            log_json: toml.logging.json,
            verbose,
            toml,
        })
    }

    /// Get the underlying file configuration.
    pub fn lintree_toml(&self) -> &LintreeToml {
        &self.toml
    }

    pub fn config_file(&self) -> PathBuf {
        self.lintree_dir.join(crate::lintree_config::CONFIG_FILE)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.lintree_dir)
            .context("Failed to create .lintree directory")?;
        std::fs::create_dir_all(&self.log_dir).context("Failed to create log directory")?;
        Ok(())
    }
}
