use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub const LOG_FILENAME: &str = "lintree.log";

/// Logging setup derived from [`Config`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Level for the log file when `RUST_LOG` is unset.
    pub level: String,
    /// Level for stderr; kept quiet unless verbose so tree output stays readable.
    pub stderr_level: String,
    pub json: bool,
}

impl LogConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            log_dir: config.log_dir.clone(),
            level: config.log_level.clone(),
            stderr_level: if config.verbose {
                config.log_level.clone()
            } else {
                "warn".to_string()
            },
            json: config.log_json,
        }
    }
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("lintree={}", level)))
}

/// Install the global subscriber: a daily-rotated file under `log_dir` plus
/// stderr. `RUST_LOG` overrides both levels.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir).with_context(|| {
        format!("Failed to create log directory {}", config.log_dir.display())
    })?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, LOG_FILENAME);

    let result = if config.json {
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_target(true)
            .with_filter(filter(&config.level));
        let stderr_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(filter(&config.stderr_level));
        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .try_init()
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_target(true)
            .with_ansi(false)
            .with_filter(filter(&config.level));
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter(&config.stderr_level));
        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .try_init()
    };

    result.context("Failed to install tracing subscriber")
}
