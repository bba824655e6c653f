//! Station identifier and record types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A stable, positive integer station identifier.
///
/// # Examples
///
/// ```
/// use fare_server::domain::StationId;
///
/// let central = StationId::parse("1").unwrap();
/// assert_eq!(central.get(), 1);
///
/// // Surrounding whitespace is tolerated
/// assert_eq!(StationId::parse(" 42 ").unwrap().get(), 42);
///
/// // Zero, negatives and non-numeric codes are rejected
/// assert!(StationId::parse("0").is_err());
/// assert!(StationId::parse("-3").is_err());
/// assert!(StationId::parse("ADM").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StationId(u32);

impl StationId {
    /// Create a station id from a raw integer. Zero is not a valid id.
    pub fn new(raw: u32) -> Result<Self, InvalidStationId> {
        if raw == 0 {
            return Err(InvalidStationId {
                reason: "must be positive",
            });
        }
        Ok(StationId(raw))
    }

    /// Parse a station id from text, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStationId { reason: "empty" });
        }
        let raw: u32 = trimmed.parse().map_err(|_| InvalidStationId {
            reason: "must be a positive integer",
        })?;
        Self::new(raw)
    }

    /// Returns the raw integer value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for StationId {
    type Error = InvalidStationId;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<StationId> for u32 {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lower-cased line code such as `isl` or `twl`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineCode(String);

impl LineCode {
    /// Normalize a raw line code. Returns `None` for blank input.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(LineCode(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The badge text shown next to a station name (e.g. `ISL`).
    pub fn badge(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transit stop with its display names and the lines it serves.
///
/// `lines` is sorted and never empty once produced by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: StationId,
    pub name_latin: String,
    pub name_local: String,
    pub lines: Vec<LineCode>,
}

impl Station {
    /// Display label combining both names, e.g. `中環 (Central)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name_local, self.name_latin)
    }
}
