use std::path::PathBuf;

/// Preference storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preferences file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),
}
