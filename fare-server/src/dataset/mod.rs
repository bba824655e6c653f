//! Durable dataset artifacts.
//!
//! The builder produces a [`Dataset`]; it is persisted as two pretty-printed
//! JSON files (`stations.json` and `fares.json`) and loaded back by the
//! server at startup.

mod error;
mod fare_table;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::Station;

pub use error::DatasetError;
pub use fare_table::FareTable;

/// File name of the station list artifact.
pub const STATIONS_FILE: &str = "stations.json";

/// File name of the fare table artifact.
pub const FARES_FILE: &str = "fares.json";

/// The normalized station list and fare table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Stations sorted ascending by id.
    pub stations: Vec<Station>,
    pub fares: FareTable,
}

impl Dataset {
    /// Write both artifacts into `dir`, creating it if needed.
    ///
    /// Both files are serialized and written to temporary names first, then
    /// renamed into place, so a failure never leaves a half-written artifact.
    /// The two renames are not atomic together: if the second one fails,
    /// `stations.json` is already replaced while `fares.json` is still the
    /// previous build's.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<(), DatasetError> {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }

        let stations_json = to_json(&self.stations, &dir.join(STATIONS_FILE))?;
        let fares_json = to_json(&self.fares, &dir.join(FARES_FILE))?;

        let staged = [
            (dir.join(STATIONS_FILE), stations_json),
            (dir.join(FARES_FILE), fares_json),
        ];

        let mut temps = Vec::with_capacity(staged.len());
        for (path, json) in &staged {
            let tmp = temp_path(path);
            if let Err(e) = std::fs::write(&tmp, json) {
                for written in &temps {
                    let _ = std::fs::remove_file(written);
                }
                return Err(io_error(&tmp, e));
            }
            temps.push(tmp);
        }

        for (i, ((path, _), tmp)) in staged.iter().zip(&temps).enumerate() {
            if let Err(e) = std::fs::rename(tmp, path) {
                for leftover in &temps[i..] {
                    let _ = std::fs::remove_file(leftover);
                }
                return Err(io_error(path, e));
            }
        }

        info!(
            dir = %dir.display(),
            stations = self.stations.len(),
            fare_sources = self.fares.source_count(),
            "wrote dataset artifacts"
        );
        Ok(())
    }

    /// Read both artifacts from `dir`.
    ///
    /// The station list must be strictly ascending by id (so one record per
    /// id) and every station must serve at least one line; anything else is
    /// rejected rather than served.
    pub fn read_from(dir: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        let stations_path = dir.join(STATIONS_FILE);
        let stations: Vec<Station> = from_json(&stations_path)?;
        check_stations(&stations, &stations_path)?;
        let fares: FareTable = from_json(&dir.join(FARES_FILE))?;
        Ok(Self { stations, fares })
    }
}

fn check_stations(stations: &[Station], path: &Path) -> Result<(), DatasetError> {
    let invalid = |message: String| DatasetError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if let Some(station) = stations.iter().find(|s| s.lines.is_empty()) {
        return Err(invalid(format!("station {} has no lines", station.id)));
    }
    if let Some(pair) = stations.windows(2).find(|w| w[0].id >= w[1].id) {
        return Err(invalid(if pair[0].id == pair[1].id {
            format!("duplicate station id {}", pair[0].id)
        } else {
            format!("station {} listed after {}", pair[1].id, pair[0].id)
        }));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn to_json<T: Serialize>(value: &T, path: &Path) -> Result<String, DatasetError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|e| DatasetError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    json.push('\n');
    Ok(json)
}

fn from_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&contents).map_err(|e| DatasetError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn io_error(path: &Path, e: std::io::Error) -> DatasetError {
    DatasetError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}
