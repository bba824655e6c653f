//! The fare table artifact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Fare;

/// Sparse two-level fare mapping, keyed `[src][dest]` by raw id strings.
///
/// Captures the source losslessly: whichever directions the export lists are
/// the directions stored. `None` marks a pair whose amount was unparseable;
/// a missing inner key means the pair was never observed. Direction folding
/// is done by the lookup engine at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FareTable {
    entries: BTreeMap<String, BTreeMap<String, Option<f64>>>,
}

impl FareTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the fare for `src → dest`, replacing any earlier entry.
    pub fn insert(&mut self, src: impl Into<String>, dest: impl Into<String>, fare: Option<Fare>) {
        self.entries
            .entry(src.into())
            .or_default()
            .insert(dest.into(), fare.map(|f| f.amount()));
    }

    /// Look up a directed entry.
    ///
    /// Returns `None` if the pair was never observed, `Some(None)` if it was
    /// observed with an unknown amount.
    pub fn get(&self, src: &str, dest: &str) -> Option<Option<Fare>> {
        self.entries
            .get(src)?
            .get(dest)
            .map(|amount| amount.and_then(Fare::new))
    }

    /// Iterate over all directed entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Option<Fare>)> + '_ {
        self.entries.iter().flat_map(|(src, inner)| {
            inner
                .iter()
                .map(move |(dest, amount)| (src.as_str(), dest.as_str(), amount.and_then(Fare::new)))
        })
    }

    /// Number of directed entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct source stations.
    pub fn source_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut table = FareTable::new();
        table.insert("1", "2", Fare::new(5.5));
        table.insert("1", "3", None);

        assert_eq!(table.get("1", "2"), Some(Fare::new(5.5)));
        assert_eq!(table.get("1", "3"), Some(None));
        assert_eq!(table.get("2", "1"), None);
        assert_eq!(table.get("9", "9"), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.source_count(), 1);
    }

    #[test]
    fn later_insert_replaces() {
        let mut table = FareTable::new();
        table.insert("1", "2", None);
        table.insert("1", "2", Fare::new(4.0));
        assert_eq!(table.get("1", "2"), Some(Fare::new(4.0)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn json_uses_null_for_unknown() {
        let mut table = FareTable::new();
        table.insert("2", "1", Fare::new(5.5));
        table.insert("1", "2", None);

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "1": { "2": null },
                "2": { "1": 5.5 },
            })
        );

        let back: FareTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn iter_visits_every_entry() {
        let mut table = FareTable::new();
        table.insert("1", "2", Fare::new(1.0));
        table.insert("1", "3", Fare::new(2.0));
        table.insert("4", "1", None);

        let entries: Vec<_> = table.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("1", "2", Fare::new(1.0)),
                ("1", "3", Fare::new(2.0)),
                ("4", "1", None),
            ]
        );
    }
}
