//! Lookup engine.
//!
//! Holds the loaded dataset in memory and answers two queries:
//! ranked station search by partial name, and the fare between two
//! stations. Fares are folded into a symmetric table at load time so the
//! query direction never matters.

mod config;
mod engine;
mod fares;
mod index;
mod session;


pub use config::LookupConfig;
pub use engine::{LookupEngine, StationMatch};
pub use fares::{FoldStats, SymmetricFares};
pub use index::{IndexEntry, SearchIndex};
pub use session::{Endpoint, Session, SessionState};
