//! Dataset builder.
//!
//! Turns the raw station and fare CSV exports into a [`Dataset`]:
//!
//! 1. Header aliases are resolved and every row is read into a typed row.
//!    Rows without a usable id are dropped, never fatal.
//! 2. Station rows are grouped by id into one [`Station`](crate::domain::Station)
//!    each, with the union of their line codes.
//! 3. Fare rows are captured as-is into a two-level table. Direction folding
//!    happens in the lookup engine, not here.

mod config;
mod error;
mod fares;
mod rows;
mod stations;

use tracing::info;

use crate::dataset::Dataset;
use crate::source::SourceClient;

pub use config::{BuilderConfig, FareAliases, StationAliases};
pub use error::BuildError;
pub use fares::{FareStats, normalize_fares};
pub use rows::{FareRow, RowStats, StationRow, read_fare_rows, read_station_rows};
pub use stations::{StationStats, normalize_stations};

/// Summary of a build run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub station_rows: RowStats,
    pub stations: StationStats,
    /// Stations in the output.
    pub station_count: usize,
    pub fare_rows: RowStats,
    pub fares: FareStats,
}

/// Build a dataset from the raw CSV texts.
///
/// Fails only when a required column is missing or the header row is
/// unreadable; malformed data rows are dropped and counted.
pub fn load(
    stations_csv: &str,
    fares_csv: &str,
    config: &BuilderConfig,
) -> Result<(Dataset, BuildReport), BuildError> {
    let (station_rows, station_row_stats) = read_station_rows(stations_csv, &config.stations)?;
    let (fare_rows, fare_row_stats) = read_fare_rows(fares_csv, &config.fares)?;

    let (stations, station_stats) = normalize_stations(station_rows, &config.excluded_lines);
    let (fares, fare_stats) = normalize_fares(fare_rows);

    let report = BuildReport {
        station_rows: station_row_stats,
        stations: station_stats,
        station_count: stations.len(),
        fare_rows: fare_row_stats,
        fares: fare_stats,
    };

    info!(
        stations = report.station_count,
        station_rows = report.station_rows.read,
        dropped_station_rows = report.station_rows.dropped,
        excluded_rows = report.stations.excluded_rows,
        name_conflicts = report.stations.name_conflicts,
        fare_entries = report.fares.entries,
        unknown_fares = report.fares.unknown,
        dropped_fare_rows = report.fare_rows.dropped,
        "normalized dataset"
    );

    Ok((Dataset { stations, fares }, report))
}

/// Fetch both exports concurrently and build a dataset.
///
/// Either fetch failing aborts the whole build before anything is parsed.
pub async fn build(
    client: &SourceClient,
    config: &BuilderConfig,
) -> Result<(Dataset, BuildReport), BuildError> {
    let (stations_csv, fares_csv) =
        futures::try_join!(client.fetch_stations(), client.fetch_fares())?;
    load(&stations_csv, &fares_csv, config)
}
