//! Web layer for the fare finder.
//!
//! Read-only JSON endpoints over the lookup engine, for the front end
//! that renders suggestions and fares.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
