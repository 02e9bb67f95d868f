//! Typed error hierarchy for lintree.
//!
//! Three top-level enums cover the three fallible boundaries:
//! - `GatewayError` — remote GraphQL fetches (propagated unmodified through the tree)
//! - `CheckoutError` — issue branch checkout flow
//! - `ConfigError` — configuration loading and validation

use thiserror::Error;

/// Errors from the Linear GraphQL gateway.
///
/// The tree resolver never catches these; a failed fetch rejects the whole
/// `get_children` call and the host decides how to show it.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("No Linear API key configured (set {env_var})")]
    MissingToken { env_var: String },

    #[error("Request to Linear failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Linear API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Linear GraphQL errors in {operation}: {}", messages.join("; "))]
    GraphQl {
        operation: String,
        messages: Vec<String>,
    },

    #[error("Failed to decode {operation} response: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the issue branch checkout flow. Each variant names the step
/// that failed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Git repository is not available: {0}")]
    RepositoryUnavailable(String),

    #[error("Failed to check out {branch}: {source}")]
    CheckoutFailed {
        branch: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to check out base branch {base}: {source}")]
    BaseCheckoutFailed {
        base: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to create new branch {branch}: {source}")]
    CreateFailed {
        branch: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file at {path}: {message}")]
    Invalid {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
