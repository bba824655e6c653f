//! Fare normalization: lossless capture into the two-level fare table.

use super::rows::FareRow;
use crate::dataset::FareTable;

/// Counters from fare normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FareStats {
    /// Directed entries in the output table.
    pub entries: usize,
    /// Entries recorded with an unknown amount.
    pub unknown: usize,
}

/// Insert every row as `[src][dest]`, keeping the direction the source used.
///
/// A repeated `(src, dest)` row replaces the earlier one.
pub fn normalize_fares(rows: impl IntoIterator<Item = FareRow>) -> (FareTable, FareStats) {
    let mut table = FareTable::new();
    for row in rows {
        table.insert(row.src, row.dest, row.fare);
    }

    let stats = FareStats {
        entries: table.len(),
        unknown: table.iter().filter(|(_, _, fare)| fare.is_none()).count(),
    };
    (table, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Fare;

    fn row(src: &str, dest: &str, fare: Option<f64>) -> FareRow {
        FareRow {
            src: src.to_string(),
            dest: dest.to_string(),
            fare: fare.and_then(Fare::new),
        }
    }

    #[test]
    fn keeps_source_direction() {
        let (table, stats) = normalize_fares(vec![row("2", "1", Some(5.5))]);

        assert_eq!(table.get("2", "1"), Some(Fare::new(5.5)));
        assert_eq!(table.get("1", "2"), None);
        assert_eq!(stats, FareStats { entries: 1, unknown: 0 });
    }

    #[test]
    fn unknown_amounts_are_kept() {
        let (table, stats) = normalize_fares(vec![row("1", "2", None), row("1", "3", Some(4.0))]);

        assert_eq!(table.get("1", "2"), Some(None));
        assert_eq!(stats, FareStats { entries: 2, unknown: 1 });
    }

    #[test]
    fn both_directions_are_kept() {
        let (table, stats) =
            normalize_fares(vec![row("1", "2", Some(5.5)), row("2", "1", Some(5.5))]);

        assert_eq!(table.get("1", "2"), Some(Fare::new(5.5)));
        assert_eq!(table.get("2", "1"), Some(Fare::new(5.5)));
        assert_eq!(stats.entries, 2);
    }

    #[test]
    fn repeated_row_last_wins() {
        let (table, stats) = normalize_fares(vec![row("1", "2", Some(5.5)), row("1", "2", None)]);

        assert_eq!(table.get("1", "2"), Some(None));
        assert_eq!(stats, FareStats { entries: 1, unknown: 1 });
    }
}
