//! Raw CSV source client.
//!
//! Downloads the station and fare exports that feed the dataset builder.

mod client;
mod error;

pub use client::{SourceClient, SourceClientConfig};
pub use error::SourceError;
