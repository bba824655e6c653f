//! Fare amounts, canonical station pairs and lookup outcomes.

use std::fmt;

use super::StationId;

/// A known fare amount: finite and non-negative.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Fare(f64);

impl Fare {
    /// Wrap a raw amount. Returns `None` for NaN, infinities and negatives.
    pub fn new(amount: f64) -> Option<Self> {
        if amount.is_finite() && amount >= 0.0 {
            Some(Fare(amount))
        } else {
            None
        }
    }

    /// Parse a decimal amount from a raw CSV field.
    ///
    /// Anything that does not yield a valid [`Fare`] (blank, `N/A`, `-`,
    /// `NaN`, negative) is `None`, which the builder records as an unknown fare.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<f64>().ok().and_then(Self::new)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl fmt::Debug for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fare({})", self.0)
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// An unordered pair of distinct stations, stored smaller id first.
///
/// # Examples
///
/// ```
/// use fare_server::domain::{FarePair, StationId};
///
/// let a = StationId::new(7).unwrap();
/// let b = StationId::new(3).unwrap();
///
/// assert_eq!(FarePair::new(a, b), FarePair::new(b, a));
/// assert_eq!(FarePair::new(a, b).unwrap().lo(), b);
///
/// // No same-station fares
/// assert!(FarePair::new(a, a).is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FarePair {
    lo: StationId,
    hi: StationId,
}

impl FarePair {
    /// Canonicalize a pair. Returns `None` when both ends are the same station.
    pub fn new(a: StationId, b: StationId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(FarePair { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(FarePair { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn lo(&self) -> StationId {
        self.lo
    }

    pub fn hi(&self) -> StationId {
        self.hi
    }
}

impl fmt::Debug for FarePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FarePair({}, {})", self.lo, self.hi)
    }
}

/// Outcome of a fare lookup between two stations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FareResult {
    /// The query is not fully specified: an endpoint is missing, unknown,
    /// or both endpoints are the same station.
    NotApplicable,
    /// The pair was never present in the source data.
    NotFound,
    /// The pair was present but its amount could not be parsed.
    Unknown,
    /// A known fare.
    Found(Fare),
}

impl FareResult {
    /// Returns the fare amount if one was found.
    pub fn fare(&self) -> Option<Fare> {
        match self {
            FareResult::Found(fare) => Some(*fare),
            _ => None,
        }
    }
}
