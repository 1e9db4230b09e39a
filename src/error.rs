use std::time::Duration;

use thiserror::Error;

use crate::store::ItemId;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from the terminal or log file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value that cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The root collection could not be loaded; nothing can be shown without it.
    #[error("Could not load the front page: {0}")]
    Bootstrap(#[source] FetchError),
}

/// Failure to fetch one item (or the root collection) from the remote source.
///
/// Item failures are local: the node becomes `Failed` and the session goes on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("item {0} does not exist")]
    Missing(ItemId),
}
