use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "lintree")]
#[command(version, about = "Linear issues for the branch you are on, as a tree")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Linear API key. Overrides the variable named by api.token_env.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the issue tree once
    Tree {
        /// Expand collapsed nodes down to this depth
        #[arg(short, long, default_value = "1")]
        depth: usize,
        /// Print issue, project and attachment URLs
        #[arg(long)]
        links: bool,
    },
    /// Keep the tree on screen and redraw when the branch or its issue changes
    Watch {
        #[arg(short, long, default_value = "1")]
        depth: usize,
    },
    /// Check out an issue branch, creating it from a base branch if needed
    Checkout {
        /// Branch name (an issue's branchName)
        branch: String,
    },
    /// Open an issue, project or attachment in the browser
    Open {
        /// URL or issue identifier such as ENG-123
        target: String,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default lintree.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Tree { depth, links } => {
            cmd::cmd_tree(&cli, project_dir, *depth, *links).await?
        }
        Commands::Watch { depth } => cmd::cmd_watch(&cli, project_dir, *depth).await?,
        Commands::Checkout { branch } => cmd::cmd_checkout(&cli, project_dir, branch).await?,
        Commands::Open { target } => cmd::cmd_open(target)?,
        Commands::Config { command } => cmd::cmd_config(&cli, &project_dir, command.clone())?,
    }

    Ok(())
}
