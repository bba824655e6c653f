//! Two-endpoint selection flow for an interactive fare query.

use super::engine::LookupEngine;
use crate::domain::{FareResult, StationId};

/// Which end of the journey a selection sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

/// Where a session is in the selection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing selected.
    Empty,
    /// Exactly one endpoint selected.
    OneSelected,
    /// Both endpoints selected and the fare resolved.
    Resolved,
}

/// Selection state for one user: origin, destination and the resolved fare.
///
/// The fare is resolved as soon as both endpoints are known, and re-resolved
/// whenever either endpoint changes.
#[derive(Debug, Clone)]
pub struct Session<'e> {
    engine: &'e LookupEngine,
    from: Option<StationId>,
    to: Option<StationId>,
    fare: Option<FareResult>,
}

impl<'e> Session<'e> {
    pub fn new(engine: &'e LookupEngine) -> Self {
        Self {
            engine,
            from: None,
            to: None,
            fare: None,
        }
    }

    /// Select a station for one endpoint.
    ///
    /// Returns the resolved fare once both endpoints are set.
    pub fn select(&mut self, endpoint: Endpoint, id: StationId) -> Option<FareResult> {
        match endpoint {
            Endpoint::From => self.from = Some(id),
            Endpoint::To => self.to = Some(id),
        }

        self.fare = match (self.from, self.to) {
            (Some(from), Some(to)) => Some(self.engine.resolve_fare(from, to)),
            _ => None,
        };
        self.fare
    }

    /// Clear both endpoints and the fare.
    pub fn reset(&mut self) {
        self.from = None;
        self.to = None;
        self.fare = None;
    }

    pub fn state(&self) -> SessionState {
        match (self.from, self.to) {
            (None, None) => SessionState::Empty,
            (Some(_), Some(_)) => SessionState::Resolved,
            _ => SessionState::OneSelected,
        }
    }

    pub fn from(&self) -> Option<StationId> {
        self.from
    }

    pub fn to(&self) -> Option<StationId> {
        self.to
    }

    /// The resolved fare, once both endpoints are selected.
    pub fn fare(&self) -> Option<FareResult> {
        self.fare
    }
}
