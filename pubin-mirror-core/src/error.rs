//! Error types for fetching and generation.

use std::path::PathBuf;

/// Failure to fetch a remote page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Every attempt failed (non-200 status or transport error).
    #[error("giving up on {url} after {attempts} attempts (last status: {})", .last_status.map(|s| s.to_string()).unwrap_or_else(|| "none".into()))]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_status: Option<u16>,
    },

    /// The server answered 200 but the body could not be read.
    #[error("failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    /// Building the HTTP client failed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure of a `generate` run. Any of these aborts the run before output
/// files are touched, except `Io` which is raised while writing them.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no lore clone prefix recorded for {hoster}/{list}")]
    MissingClonePrefix { hoster: String, list: String },
}
