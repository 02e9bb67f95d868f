//! Configuration view and validation commands — `lintree config`.

use anyhow::Result;

use super::super::{Cli, ConfigCommands};

pub fn cmd_config(
    cli: &Cli,
    project_dir: &std::path::Path,
    command: Option<ConfigCommands>,
) -> Result<()> {
    use lintree::config::Config;
    use lintree::lintree_config::{CONFIG_FILE, LintreeToml};

    let lintree_dir = project_dir.join(".lintree");
    let config_path = lintree_dir.join(CONFIG_FILE);

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Lintree Configuration");
            println!("=====================");
            println!();

            let toml = if config_path.exists() {
                println!("Config file: {}", config_path.display());
                LintreeToml::load(&config_path)?
            } else {
                println!("No lintree.toml found at {}", config_path.display());
                println!("Using default configuration.");
                LintreeToml::default()
            };
            println!();

            println!("[api]");
            if let Some(endpoint) = &toml.api.endpoint {
                println!("  endpoint = \"{}\"", endpoint);
            }
            println!("  token_env = \"{}\"", toml.api.token_env);
            println!();
            println!("[tree]");
            println!("  branch_retry_ms = {}", toml.tree.branch_retry_ms);
            println!();
            println!("[polling]");
            println!("  branch_interval_ms = {}", toml.polling.branch_interval_ms);
            println!("  issue_interval_ms = {}", toml.polling.issue_interval_ms);
            println!();
            println!("[git]");
            println!("  default_branch = \"{}\"", toml.default_branch());
            println!();
            println!("[logging]");
            println!("  level = \"{}\"", toml.logging.level);
            println!("  json = {}", toml.logging.json);
            println!();

            // Effective values (including env/CLI overrides)
            println!("Effective values (with env/CLI overrides):");
            let config = Config::new(project_dir.to_path_buf(), cli.verbose, cli.api_key.clone())?;
            println!("  endpoint = \"{}\"", config.api_endpoint);
            println!(
                "  api_key = {}",
                if config.api_key.is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!("  log_level = \"{}\"", config.log_level);
            println!();
            if !config_path.exists() {
                println!("Run 'lintree config init' to create a lintree.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No lintree.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = LintreeToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("lintree.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !lintree_dir.exists() {
                std::fs::create_dir_all(&lintree_dir)?;
            }

            LintreeToml::default().save(&config_path)?;

            println!("Created lintree.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [api] endpoint, token_env");
            println!("  - [polling] branch_interval_ms, issue_interval_ms");
            println!("  - [git] default_branch");
            println!();
        }
    }

    Ok(())
}
