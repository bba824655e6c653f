//! Symmetric fare lookup folded from the directed fare table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

use crate::dataset::FareTable;
use crate::domain::{Fare, FarePair, StationId};

/// Counters from folding a fare table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldStats {
    /// Entries whose keys are not valid station ids, or name the same station twice.
    pub skipped: usize,
    /// Pairs listed in both directions with different known amounts.
    pub conflicts: usize,
}

struct Folded {
    fare: Option<Fare>,
    canonical: bool,
}

/// Fares keyed by unordered station pair.
///
/// One entry answers both query directions.
#[derive(Debug, Clone, Default)]
pub struct SymmetricFares {
    pairs: HashMap<FarePair, Option<Fare>>,
}

impl SymmetricFares {
    /// Fold a directed table into a symmetric one.
    ///
    /// When a pair appears in both directions, a known amount beats an
    /// unknown one. Two different known amounts keep the one listed under
    /// the canonical direction (smaller id first).
    pub fn fold(table: &FareTable) -> (Self, FoldStats) {
        let mut stats = FoldStats::default();
        let mut folded: HashMap<FarePair, Folded> = HashMap::new();

        for (src, dest, fare) in table.iter() {
            let (Ok(a), Ok(b)) = (StationId::parse(src), StationId::parse(dest)) else {
                debug!(src, dest, "skipping fare entry with non-station key");
                stats.skipped += 1;
                continue;
            };
            let Some(pair) = FarePair::new(a, b) else {
                stats.skipped += 1;
                continue;
            };
            let canonical = a == pair.lo();

            match folded.entry(pair) {
                Entry::Vacant(slot) => {
                    slot.insert(Folded { fare, canonical });
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    match (existing.fare, fare) {
                        (None, Some(_)) => *existing = Folded { fare, canonical },
                        (Some(kept), Some(other)) if kept != other => {
                            stats.conflicts += 1;
                            warn!(
                                lo = %pair.lo(),
                                hi = %pair.hi(),
                                %kept,
                                %other,
                                "fare differs by direction, keeping canonical direction"
                            );
                            if canonical && !existing.canonical {
                                *existing = Folded { fare, canonical };
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        let pairs = folded.into_iter().map(|(pair, f)| (pair, f.fare)).collect();
        (Self { pairs }, stats)
    }

    /// Look up a pair.
    ///
    /// `None` if never observed, `Some(None)` if observed with an unknown amount.
    pub fn get(&self, pair: FarePair) -> Option<Option<Fare>> {
        self.pairs.get(&pair).copied()
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u32, b: u32) -> FarePair {
        FarePair::new(StationId::new(a).unwrap(), StationId::new(b).unwrap()).unwrap()
    }

    fn fold(entries: &[(&str, &str, Option<f64>)]) -> (SymmetricFares, FoldStats) {
        let mut table = FareTable::new();
        for (src, dest, fare) in entries {
            table.insert(*src, *dest, fare.and_then(Fare::new));
        }
        SymmetricFares::fold(&table)
    }

    #[test]
    fn one_direction_serves_both() {
        let (fares, stats) = fold(&[("2", "1", Some(5.5))]);
        assert_eq!(fares.get(pair(1, 2)), Some(Fare::new(5.5)));
        assert_eq!(fares.get(pair(2, 1)), Some(Fare::new(5.5)));
        assert_eq!(fares.len(), 1);
        assert_eq!(stats, FoldStats::default());
    }

    #[test]
    fn unknown_is_kept_distinct() {
        let (fares, _) = fold(&[("1", "2", None)]);
        assert_eq!(fares.get(pair(1, 2)), Some(None));
        assert_eq!(fares.get(pair(1, 3)), None);
    }

    #[test]
    fn known_beats_unknown_in_either_order() {
        let (fares, _) = fold(&[("1", "2", None), ("2", "1", Some(4.0))]);
        assert_eq!(fares.get(pair(1, 2)), Some(Fare::new(4.0)));

        let (fares, _) = fold(&[("1", "2", Some(4.0)), ("2", "1", None)]);
        assert_eq!(fares.get(pair(1, 2)), Some(Fare::new(4.0)));
    }

    #[test]
    fn conflicting_directions_keep_canonical() {
        let (fares, stats) = fold(&[("1", "2", Some(4.0)), ("2", "1", Some(4.5))]);
        assert_eq!(fares.get(pair(1, 2)), Some(Fare::new(4.0)));
        assert_eq!(stats.conflicts, 1);

        // Table iteration visits "10" before "9", so the reverse direction comes first here
        let (fares, stats) = fold(&[("9", "10", Some(7.0)), ("10", "9", Some(7.5))]);
        assert_eq!(fares.get(pair(9, 10)), Some(Fare::new(7.0)));
        assert_eq!(stats.conflicts, 1);
    }

    #[test]
    fn skips_non_station_keys() {
        let (fares, stats) = fold(&[
            ("CEN", "2", Some(4.0)),
            ("1", "0", Some(3.0)),
            ("1", "2", Some(5.0)),
        ]);
        assert_eq!(fares.len(), 1);
        assert_eq!(stats.skipped, 2);
    }

    #[test]
    fn skips_padded_self_pairs() {
        let (fares, stats) = fold(&[("1", "01", Some(1.0))]);
        assert!(fares.is_empty());
        assert_eq!(stats.skipped, 1);
    }
}
