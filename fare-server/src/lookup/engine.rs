//! The lookup engine: station search and fare resolution.

use std::collections::HashMap;

use tracing::info;

use super::config::LookupConfig;
use super::fares::{FoldStats, SymmetricFares};
use super::index::SearchIndex;
use crate::dataset::{Dataset, FareTable};
use crate::domain::{FarePair, FareResult, Station, StationId};

/// A search hit with its precomputed display data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationMatch<'a> {
    pub station: &'a Station,
    pub label: &'a str,
    pub badges: &'a [String],
}

/// In-memory station and fare data, immutable once constructed.
///
/// Queries are pure functions of the loaded data, so one engine can be
/// shared across threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct LookupEngine {
    stations: Vec<Station>,
    positions: HashMap<StationId, usize>,
    index: SearchIndex,
    fares: SymmetricFares,
    config: LookupConfig,
}

impl LookupEngine {
    /// Build an engine from a station list and a directed fare table.
    ///
    /// Stations are kept in the given order, which is the order search
    /// results come back in. The fare table is folded so both query
    /// directions resolve to the same entry.
    pub fn new(stations: Vec<Station>, fares: &FareTable, config: LookupConfig) -> Self {
        let positions = stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
        let index = SearchIndex::build(&stations);
        let (fares, fold_stats) = SymmetricFares::fold(fares);

        log_loaded(stations.len(), fares.len(), fold_stats);

        Self {
            stations,
            positions,
            index,
            fares,
            config,
        }
    }

    /// Build an engine from a loaded dataset.
    pub fn from_dataset(dataset: Dataset, config: LookupConfig) -> Self {
        Self::new(dataset.stations, &dataset.fares, config)
    }

    /// Stations whose names contain `query`, case-insensitively.
    ///
    /// A blank query matches nothing. Results are in dataset order, truncated
    /// to the configured maximum.
    pub fn search(&self, query: &str) -> Vec<&Station> {
        self.search_matches(query)
            .into_iter()
            .map(|m| m.station)
            .collect()
    }

    /// Like [`search`](Self::search), with each hit's label and line badges.
    pub fn search_matches(&self, query: &str) -> Vec<StationMatch<'_>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.index
            .matching(&needle)
            .take(self.config.max_results)
            .filter_map(|i| self.match_at(i))
            .collect()
    }

    /// A loaded station with its precomputed display data.
    pub fn station_match(&self, id: StationId) -> Option<StationMatch<'_>> {
        self.positions.get(&id).and_then(|&i| self.match_at(i))
    }

    fn match_at(&self, position: usize) -> Option<StationMatch<'_>> {
        let entry = self.index.get(position)?;
        Some(StationMatch {
            station: self.stations.get(position)?,
            label: &entry.label,
            badges: &entry.badges,
        })
    }

    /// Resolve the fare between two stations, in either order.
    ///
    /// The same station twice, or a station that is not loaded, is
    /// [`FareResult::NotApplicable`].
    pub fn resolve_fare(&self, a: StationId, b: StationId) -> FareResult {
        let Some(pair) = FarePair::new(a, b) else {
            return FareResult::NotApplicable;
        };
        if !self.contains(a) || !self.contains(b) {
            return FareResult::NotApplicable;
        }

        match self.fares.get(pair) {
            None => FareResult::NotFound,
            Some(None) => FareResult::Unknown,
            Some(Some(fare)) => FareResult::Found(fare),
        }
    }

    /// Resolve a fare from raw id text, as received from a client.
    ///
    /// Ids that do not parse are [`FareResult::NotApplicable`].
    pub fn resolve_fare_str(&self, a: &str, b: &str) -> FareResult {
        match (StationId::parse(a), StationId::parse(b)) {
            (Ok(a), Ok(b)) => self.resolve_fare(a, b),
            _ => FareResult::NotApplicable,
        }
    }

    pub(crate) fn contains(&self, id: StationId) -> bool {
        self.positions.contains_key(&id)
    }
}

fn log_loaded(stations: usize, pairs: usize, stats: FoldStats) {
    info!(
        stations,
        fare_pairs = pairs,
        skipped_fare_entries = stats.skipped,
        direction_conflicts = stats.conflicts,
        "lookup engine loaded"
    );
}
