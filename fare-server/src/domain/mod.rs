//! Domain types for the fare finder.
//!
//! Validated values shared by the dataset builder and the lookup engine.
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod fare;
mod station;

pub use fare::{Fare, FarePair, FareResult};
pub use station::{InvalidStationId, LineCode, Station, StationId};
