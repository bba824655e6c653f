//! Lookup engine configuration.

/// Configuration for station search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Maximum number of stations returned by a search.
    pub max_results: usize,
}

impl LookupConfig {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}
