//! Station normalization: exclusion, deduplication and line aggregation.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::rows::StationRow;
use crate::domain::{LineCode, Station, StationId};

/// Counters from station normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StationStats {
    /// Rows skipped because their line is excluded.
    pub excluded_rows: usize,
    /// Rows whose names disagree with the first row seen for the same id.
    pub name_conflicts: usize,
    /// Ids dropped because none of their rows carried a line code.
    pub without_lines: usize,
}

struct Group {
    name_latin: String,
    name_local: String,
    lines: BTreeSet<LineCode>,
}

/// Collapse raw rows into one [`Station`] per id, sorted ascending by id.
///
/// Rows on an excluded line are ignored before grouping. Within a group the
/// first row's names win; a later row with different names is logged and
/// counted, never merged. `lines` is the sorted union of the group's line codes.
pub fn normalize_stations(
    rows: impl IntoIterator<Item = StationRow>,
    excluded_lines: &[String],
) -> (Vec<Station>, StationStats) {
    let mut stats = StationStats::default();
    let mut groups: BTreeMap<StationId, Group> = BTreeMap::new();

    for row in rows {
        if let Some(line) = &row.line
            && excluded_lines.iter().any(|l| l == line.as_str())
        {
            stats.excluded_rows += 1;
            continue;
        }

        match groups.get_mut(&row.id) {
            Some(group) => {
                if group.name_latin != row.name_latin || group.name_local != row.name_local {
                    warn!(
                        id = %row.id,
                        kept = %format!("{} / {}", group.name_latin, group.name_local),
                        ignored = %format!("{} / {}", row.name_latin, row.name_local),
                        "conflicting names for station, keeping first seen"
                    );
                    stats.name_conflicts += 1;
                }
                group.lines.extend(row.line);
            }
            None => {
                groups.insert(
                    row.id,
                    Group {
                        name_latin: row.name_latin,
                        name_local: row.name_local,
                        lines: row.line.into_iter().collect(),
                    },
                );
            }
        }
    }

    let stations = groups
        .into_iter()
        .filter_map(|(id, group)| {
            if group.lines.is_empty() {
                debug!(%id, "dropping station with no line codes");
                stats.without_lines += 1;
                return None;
            }
            Some(Station {
                id,
                name_latin: group.name_latin,
                name_local: group.name_local,
                lines: group.lines.into_iter().collect(),
            })
        })
        .collect();

    (stations, stats)
}
