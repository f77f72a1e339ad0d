//! CLI error types.

use feedmark_babel::FeedError;
use feedmark_config::LoadError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] LoadError),

    #[error("Error reading '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error reading feed '{path}': {source}")]
    Feed { path: PathBuf, source: FeedError },

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
