//! Dataset builder error types.

use crate::source::SourceError;

/// Errors that abort a build run.
///
/// Per-row problems are never errors: malformed rows are dropped and
/// counted in the [`BuildReport`](super::BuildReport).
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A raw source could not be fetched
    #[error("source unavailable: {0}")]
    Source(#[from] SourceError),

    /// None of the accepted header aliases for a required field is present
    #[error("{source_name} CSV has no column for {field} (accepted headers: {aliases})")]
    MissingColumn {
        source_name: &'static str,
        field: &'static str,
        aliases: String,
    },

    /// The header row could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
