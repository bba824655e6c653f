//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::FareResult;
use crate::lookup::StationMatch;

/// Request to search stations by partial name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Query text; blank matches nothing
    #[serde(default)]
    pub q: String,
}

/// A station as shown in suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationView {
    pub id: u32,
    pub name_latin: String,
    pub name_local: String,
    /// e.g. `中環 (Central)`
    pub label: String,
    /// Upper-cased line codes for badges
    pub badges: Vec<String>,
    /// Lower-cased line codes
    pub lines: Vec<String>,
}

impl StationView {
    pub fn from_match(m: &StationMatch<'_>) -> Self {
        Self {
            id: m.station.id.get(),
            name_latin: m.station.name_latin.clone(),
            name_local: m.station.name_local.clone(),
            label: m.label.to_string(),
            badges: m.badges.to_vec(),
            lines: m.station.lines.iter().map(|l| l.as_str().to_string()).collect(),
        }
    }
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationView>,
}

/// Request for the fare between two stations.
///
/// Both ids are optional so a half-filled form still gets a neutral answer.
#[derive(Debug, Deserialize)]
pub struct FareRequest {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Outcome of a fare query, as sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FareOutcome {
    Found,
    NotFound,
    Unknown,
    NotApplicable,
}

/// Response for a fare query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareResponse {
    pub outcome: FareOutcome,
    /// Fare amount when found
    pub amount: Option<f64>,
    /// Text to show the user
    pub message: String,
}

impl FareResponse {
    pub fn from_result(result: FareResult) -> Self {
        let (outcome, amount, message) = match result {
            FareResult::Found(fare) => (FareOutcome::Found, Some(fare.amount()), format!("$ {fare}")),
            FareResult::NotFound => (FareOutcome::NotFound, None, "Fare not found.".to_string()),
            FareResult::Unknown => (FareOutcome::Unknown, None, "Fare unavailable.".to_string()),
            FareResult::NotApplicable => (
                FareOutcome::NotApplicable,
                None,
                "Select two different stations.".to_string(),
            ),
        };
        Self {
            outcome,
            amount,
            message,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Fare;

    #[test]
    fn found_fare_response() {
        let response = FareResponse::from_result(FareResult::Found(Fare::new(5.5).unwrap()));
        assert_eq!(response.outcome, FareOutcome::Found);
        assert_eq!(response.amount, Some(5.5));
        assert_eq!(response.message, "$ 5.50");
    }

    #[test]
    fn outcomes_stay_distinct() {
        let not_found = FareResponse::from_result(FareResult::NotFound);
        let unknown = FareResponse::from_result(FareResult::Unknown);
        let not_applicable = FareResponse::from_result(FareResult::NotApplicable);

        assert_eq!(not_found.outcome, FareOutcome::NotFound);
        assert_eq!(unknown.outcome, FareOutcome::Unknown);
        assert_eq!(not_applicable.outcome, FareOutcome::NotApplicable);
        assert_ne!(not_found.message, unknown.message);
        assert!(unknown.amount.is_none());
    }

    #[test]
    fn fare_response_json() {
        let json = serde_json::to_value(FareResponse::from_result(FareResult::Unknown)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "outcome": "unknown",
                "amount": null,
                "message": "Fare unavailable.",
            })
        );
    }
}
