//! Source fetch error types.

/// Errors that can occur while fetching a raw CSV export.
///
/// Any of these aborts a build run.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source returned a non-success status
    #[error("fetch of {url} failed with status {status}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// Client could not be configured
    #[error("invalid source configuration: {message}")]
    Config { message: String },
}
