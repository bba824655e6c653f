//! Application state for the web layer.

use std::sync::Arc;

use crate::lookup::LookupEngine;

/// Shared application state.
///
/// The engine is immutable, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Loaded station and fare data
    pub engine: Arc<LookupEngine>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: LookupEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
