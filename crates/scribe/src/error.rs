//! CLI error types.

use scribe_config::ConfigError;
use scribe_project::GitError;
use scribe_state::StateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Git(#[from] GitError),

    #[error("{0}")]
    State(#[from] StateError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
