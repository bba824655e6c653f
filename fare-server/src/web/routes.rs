//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use crate::domain::StationId;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir`, if given, is served under `/static`.
pub fn create_router(state: AppState, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/:id", get(get_station))
        .route("/api/fare", get(get_fare));

    let router = match static_dir {
        Some(dir) => router.nest_service("/static", ServeDir::new(dir)),
        None => router,
    };

    router.with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stations by partial name.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let stations = state
        .engine
        .search_matches(&req.q)
        .iter()
        .map(StationView::from_match)
        .collect();

    Json(StationSearchResponse { stations })
}

/// Look up a single station by id.
async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationView>, AppError> {
    let id = StationId::parse(&id).map_err(|_| AppError::BadRequest {
        message: format!("Invalid station id: {}", id),
    })?;

    let found = state
        .engine
        .station_match(id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("No station with id {}", id),
        })?;

    Ok(Json(StationView::from_match(&found)))
}

/// Resolve the fare between two stations.
///
/// Never an error: incomplete or invalid queries get a `not_applicable` outcome.
async fn get_fare(
    State(state): State<AppState>,
    Query(req): Query<FareRequest>,
) -> Json<FareResponse> {
    let from = req.from.as_deref().unwrap_or("");
    let to = req.to.as_deref().unwrap_or("");
    let result = state.engine.resolve_fare_str(from, to);
    debug!(from, to, ?result, "fare query");

    Json(FareResponse::from_result(result))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
