//! Artifact I/O error types.

use std::path::PathBuf;

/// Errors that can occur when reading or writing dataset artifacts.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Artifact could not be (de)serialized
    #[error("JSON error in {}: {message}", path.display())]
    Json { path: PathBuf, message: String },

    /// Artifact parsed but breaks a dataset invariant
    #[error("invalid artifact {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}
