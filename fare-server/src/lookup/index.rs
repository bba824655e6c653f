//! Precomputed search data for each station.

use crate::domain::Station;

/// Searchable text and display data for one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Lower-cased `name_latin + name_local`.
    pub haystack: String,
    /// Display label, e.g. `中環 (Central)`.
    pub label: String,
    /// Upper-cased line codes, in the station's line order.
    pub badges: Vec<String>,
}

impl IndexEntry {
    fn new(station: &Station) -> Self {
        Self {
            haystack: format!("{}{}", station.name_latin, station.name_local).to_lowercase(),
            label: station.label(),
            badges: station.lines.iter().map(|l| l.badge()).collect(),
        }
    }
}

/// Search index parallel to the engine's station list.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Build the index for `stations`; entry `i` describes `stations[i]`.
    pub fn build(stations: &[Station]) -> Self {
        Self {
            entries: stations.iter().map(IndexEntry::new).collect(),
        }
    }

    pub fn get(&self, position: usize) -> Option<&IndexEntry> {
        self.entries.get(position)
    }

    /// Positions whose haystack contains `needle`, in index order.
    ///
    /// `needle` must already be lower-cased and non-empty.
    pub fn matching<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.haystack.contains(needle))
            .map(|(i, _)| i)
    }
}
