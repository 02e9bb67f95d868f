//! Configuration file for lintree.
//!
//! Settings are read from `.lintree/lintree.toml` in the project directory and
//! layered file → environment → CLI by [`crate::config::Config`].
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! endpoint = "https://api.linear.app/graphql"
//! token_env = "LINEAR_API_KEY"
//!
//! [tree]
//! branch_retry_ms = 1000
//!
//! [polling]
//! branch_interval_ms = 1000
//! issue_interval_ms = 5000
//!
//! [git]
//! default_branch = "main"
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::linear::client::DEFAULT_ENDPOINT;

pub const CONFIG_FILE: &str = "lintree.toml";
pub const DEFAULT_TOKEN_ENV: &str = "LINEAR_API_KEY";
pub const ENDPOINT_ENV: &str = "LINTREE_API_URL";
pub const FALLBACK_BASE_BRANCH: &str = "main";

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// GraphQL endpoint (default: Linear production)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Environment variable holding the API key
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            token_env: default_token_env(),
        }
    }
}

/// Tree resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSection {
    /// Delay before re-resolving the current branch while git is not ready
    #[serde(default = "default_branch_retry_ms")]
    pub branch_retry_ms: u64,
}

fn default_branch_retry_ms() -> u64 {
    1000
}

impl Default for TreeSection {
    fn default() -> Self {
        Self {
            branch_retry_ms: default_branch_retry_ms(),
        }
    }
}

/// Focus-gated poll intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSection {
    /// How often to compare the live git branch with the last resolved one
    #[serde(default = "default_branch_interval_ms")]
    pub branch_interval_ms: u64,
    /// How often to re-fetch the current branch issue
    #[serde(default = "default_issue_interval_ms")]
    pub issue_interval_ms: u64,
}

fn default_branch_interval_ms() -> u64 {
    1000
}

fn default_issue_interval_ms() -> u64 {
    5000
}

impl Default for PollingSection {
    fn default() -> Self {
        Self {
            branch_interval_ms: default_branch_interval_ms(),
            issue_interval_ms: default_issue_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitSection {
    /// Base branch offered when an issue branch does not exist yet
    #[serde(default)]
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// The complete lintree.toml configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LintreeToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub tree: TreeSection,
    #[serde(default)]
    pub polling: PollingSection,
    #[serde(default)]
    pub git: GitSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl LintreeToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse lintree.toml")
    }

    /// Load configuration from `<lintree_dir>/lintree.toml`.
    /// Returns default configuration if the file doesn't exist.
    pub fn load_or_default(lintree_dir: &Path) -> Result<Self> {
        let config_path = lintree_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize lintree.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// GraphQL endpoint (env → file → default).
    pub fn endpoint_with(&self, env: impl Fn(&str) -> Option<String>) -> String {
        env(ENDPOINT_ENV)
            .filter(|v| !v.is_empty())
            .or_else(|| self.api.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// API key from the configured environment variable.
    pub fn api_key_with(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        env(&self.api.token_env).filter(|v| !v.trim().is_empty())
    }

    /// Base branch for new issue branches.
    pub fn default_branch(&self) -> String {
        self.git
            .default_branch
            .clone()
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| FALLBACK_BASE_BRANCH.to_string())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(endpoint) = &self.api.endpoint
            && !(endpoint.starts_with("https://") || endpoint.starts_with("http://"))
        {
            warnings.push(format!(
                "Invalid api.endpoint '{}': should be an http(s) URL",
                endpoint
            ));
        }
        if self.api.token_env.trim().is_empty() {
            warnings.push("api.token_env is empty; no API key can be read".to_string());
        }
        if self.tree.branch_retry_ms == 0 {
            warnings.push("tree.branch_retry_ms is 0; current branch retries will spin".to_string());
        }
        if self.polling.branch_interval_ms == 0 {
            warnings.push("polling.branch_interval_ms must be greater than zero".to_string());
        }
        if self.polling.issue_interval_ms == 0 {
            warnings.push("polling.issue_interval_ms must be greater than zero".to_string());
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            warnings.push(format!(
                "Invalid logging.level '{}': expected trace, debug, info, warn or error",
                self.logging.level
            ));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = LintreeToml::parse("").unwrap();
        assert_eq!(cfg.api.token_env, "LINEAR_API_KEY");
        assert_eq!(cfg.tree.branch_retry_ms, 1000);
        assert_eq!(cfg.polling.branch_interval_ms, 1000);
        assert_eq!(cfg.polling.issue_interval_ms, 5000);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let cfg = LintreeToml::parse(
            r#"
            [polling]
            issue_interval_ms = 10000

            [git]
            default_branch = "develop"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.polling.branch_interval_ms, 1000);
        assert_eq!(cfg.polling.issue_interval_ms, 10000);
        assert_eq!(cfg.default_branch(), "develop");
    }

    #[test]
    fn test_default_branch_falls_back_to_main() {
        let mut cfg = LintreeToml::default();
        assert_eq!(cfg.default_branch(), "main");
        cfg.git.default_branch = Some(String::new());
        assert_eq!(cfg.default_branch(), "main");
    }

    #[test]
    fn test_endpoint_env_overrides_file() {
        let mut cfg = LintreeToml::default();
        assert_eq!(cfg.endpoint_with(no_env), DEFAULT_ENDPOINT);
        cfg.api.endpoint = Some("http://localhost:9000/graphql".to_string());
        assert_eq!(cfg.endpoint_with(no_env), "http://localhost:9000/graphql");
        let env = |k: &str| (k == ENDPOINT_ENV).then(|| "http://proxy/graphql".to_string());
        assert_eq!(cfg.endpoint_with(env), "http://proxy/graphql");
    }

    #[test]
    fn test_api_key_reads_configured_variable() {
        let mut cfg = LintreeToml::default();
        cfg.api.token_env = "MY_LINEAR_KEY".to_string();
        let env = |k: &str| (k == "MY_LINEAR_KEY").then(|| "lin_api_1".to_string());
        assert_eq!(cfg.api_key_with(env).as_deref(), Some("lin_api_1"));
        assert!(cfg.api_key_with(no_env).is_none());
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let cfg = LintreeToml::default();
        let env = |_: &str| Some("   ".to_string());
        assert!(cfg.api_key_with(env).is_none());
    }

    #[test]
    fn test_validate_flags_bad_values() {
        let cfg = LintreeToml::parse(
            r#"
            [api]
            endpoint = "ftp://linear"

            [polling]
            branch_interval_ms = 0

            [logging]
            level = "loud"
            "#,
        )
        .unwrap();
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("api.endpoint")));
        assert!(warnings.iter().any(|w| w.contains("branch_interval_ms")));
        assert!(warnings.iter().any(|w| w.contains("logging.level")));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(LintreeToml::parse("[polling\nbranch_interval_ms = ").is_err());
    }

    #[test]
    fn test_save_and_load_or_default() {
        let dir = tempdir().unwrap();
        assert_eq!(
            LintreeToml::load_or_default(dir.path())
                .unwrap()
                .tree
                .branch_retry_ms,
            1000
        );

        let mut cfg = LintreeToml::default();
        cfg.tree.branch_retry_ms = 250;
        cfg.save(&dir.path().join(CONFIG_FILE)).unwrap();

        let loaded = LintreeToml::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded.tree.branch_retry_ms, 250);
    }
}
