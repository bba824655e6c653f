//! Header alias resolution and strongly-typed raw rows.
//!
//! Raw exports are loosely typed: header names vary between export versions
//! and any field may be blank. Each source is read once into typed rows here,
//! so normalization never touches a `csv::StringRecord`.

use csv::StringRecord;
use tracing::debug;

use super::config::{FareAliases, StationAliases};
use super::error::BuildError;
use crate::domain::{Fare, LineCode, StationId};

/// One row of the stations export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRow {
    pub id: StationId,
    pub name_latin: String,
    pub name_local: String,
    pub line: Option<LineCode>,
}

/// One row of the fares export. Ids are kept as opaque strings.
#[derive(Debug, Clone, PartialEq)]
pub struct FareRow {
    pub src: String,
    pub dest: String,
    pub fare: Option<Fare>,
}

/// Row counts for one source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    /// Data rows read (excluding the header).
    pub read: usize,
    /// Rows dropped as malformed.
    pub dropped: usize,
}

/// Normalized header names of a CSV source.
struct Headers(Vec<String>);

impl Headers {
    fn new(record: &StringRecord) -> Self {
        Self(record.iter().map(normalize_header).collect())
    }

    /// Column indices matching `aliases`, in alias order.
    fn resolve(&self, aliases: &[String]) -> Vec<usize> {
        aliases
            .iter()
            .filter_map(|alias| {
                let alias = normalize_header(alias);
                self.0.iter().position(|h| h.eq_ignore_ascii_case(&alias))
            })
            .collect()
    }

    fn require(
        &self,
        source_name: &'static str,
        field: &'static str,
        aliases: &[String],
    ) -> Result<Vec<usize>, BuildError> {
        let columns = self.resolve(aliases);
        if columns.is_empty() {
            return Err(BuildError::MissingColumn {
                source_name,
                field,
                aliases: aliases.join(", "),
            });
        }
        Ok(columns)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// First non-blank value among `columns`, trimmed.
fn first_text<'r>(record: &'r StringRecord, columns: &[usize]) -> Option<&'r str> {
    columns
        .iter()
        .filter_map(|&i| record.get(i))
        .map(str::trim)
        .find(|v| !v.is_empty())
}

/// Resolved column indices for the stations export.
struct StationColumns {
    id: Vec<usize>,
    name_latin: Vec<usize>,
    name_local: Vec<usize>,
    line: Vec<usize>,
}

impl StationColumns {
    fn resolve(headers: &Headers, aliases: &StationAliases) -> Result<Self, BuildError> {
        Ok(Self {
            id: headers.require("stations", "station id", &aliases.id)?,
            name_latin: headers.resolve(&aliases.name_latin),
            name_local: headers.resolve(&aliases.name_local),
            line: headers.require("stations", "line code", &aliases.line)?,
        })
    }

    /// Extract a typed row. Returns `None` if no id alias holds a valid id.
    fn extract(&self, record: &StringRecord) -> Option<StationRow> {
        let id = self
            .id
            .iter()
            .filter_map(|&i| record.get(i))
            .find_map(|v| StationId::parse(v).ok())?;

        Some(StationRow {
            id,
            name_latin: first_text(record, &self.name_latin).unwrap_or_default().to_string(),
            name_local: first_text(record, &self.name_local).unwrap_or_default().to_string(),
            line: first_text(record, &self.line).and_then(LineCode::parse),
        })
    }
}

/// Resolved column indices for the fares export.
struct FareColumns {
    src: Vec<usize>,
    dest: Vec<usize>,
    fare: Vec<usize>,
}

impl FareColumns {
    fn resolve(headers: &Headers, aliases: &FareAliases) -> Result<Self, BuildError> {
        Ok(Self {
            src: headers.require("fares", "source station id", &aliases.src)?,
            dest: headers.require("fares", "destination station id", &aliases.dest)?,
            fare: headers.require("fares", "fare amount", &aliases.fare)?,
        })
    }

    /// Extract a typed row.
    ///
    /// Returns `None` for a blank id or a same-station pair. An unparseable
    /// amount still yields a row, with `fare: None`.
    fn extract(&self, record: &StringRecord) -> Option<FareRow> {
        let src = first_text(record, &self.src)?;
        let dest = first_text(record, &self.dest)?;
        if src == dest {
            return None;
        }

        Some(FareRow {
            src: src.to_string(),
            dest: dest.to_string(),
            fare: first_text(record, &self.fare).and_then(Fare::parse),
        })
    }
}

/// Read the stations export into typed rows.
pub fn read_station_rows(
    text: &str,
    aliases: &StationAliases,
) -> Result<(Vec<StationRow>, RowStats), BuildError> {
    read_rows(
        text,
        "stations",
        |headers| StationColumns::resolve(headers, aliases),
        StationColumns::extract,
    )
}

/// Read the fares export into typed rows.
pub fn read_fare_rows(
    text: &str,
    aliases: &FareAliases,
) -> Result<(Vec<FareRow>, RowStats), BuildError> {
    read_rows(
        text,
        "fares",
        |headers| FareColumns::resolve(headers, aliases),
        FareColumns::extract,
    )
}

fn read_rows<C, T>(
    text: &str,
    source_name: &'static str,
    resolve: impl FnOnce(&Headers) -> Result<C, BuildError>,
    extract: impl Fn(&C, &StringRecord) -> Option<T>,
) -> Result<(Vec<T>, RowStats), BuildError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = Headers::new(reader.headers()?);
    let columns = resolve(&headers)?;

    let mut rows = Vec::new();
    let mut stats = RowStats::default();

    for (line, result) in reader.records().enumerate() {
        stats.read += 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!(source = source_name, line = line + 2, error = %e, "skipping unreadable row");
                stats.dropped += 1;
                continue;
            }
        };

        match extract(&columns, &record) {
            Some(row) => rows.push(row),
            None => {
                debug!(source = source_name, line = line + 2, ?record, "skipping malformed row");
                stats.dropped += 1;
            }
        }
    }

    Ok((rows, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station_rows(text: &str) -> (Vec<StationRow>, RowStats) {
        read_station_rows(text, &StationAliases::default()).unwrap()
    }

    fn fare_rows(text: &str) -> (Vec<FareRow>, RowStats) {
        read_fare_rows(text, &FareAliases::default()).unwrap()
    }

    #[test]
    fn reads_current_station_headers() {
        let csv = "\
\"Line Code\",\"Direction\",\"Station Code\",\"Station ID\",\"Chinese Name\",\"English Name\",\"Sequence\"
\"EAL\",\"DT\",\"ADM\",\"2\",\"金鐘\",\"Admiralty\",\"1.00\"
";
        let (rows, stats) = station_rows(csv);
        assert_eq!(stats, RowStats { read: 1, dropped: 0 });
        assert_eq!(
            rows,
            vec![StationRow {
                id: StationId::new(2).unwrap(),
                name_latin: "Admiralty".to_string(),
                name_local: "金鐘".to_string(),
                line: LineCode::parse("eal"),
            }]
        );
    }

    #[test]
    fn reads_legacy_station_headers() {
        let csv = "StationID,EnglishName,ChineseName,LineCode\n1,Central,中環,TWL\n";
        let (rows, _) = station_rows(csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.get(), 1);
        assert_eq!(rows[0].name_latin, "Central");
        assert_eq!(rows[0].line.as_ref().unwrap().as_str(), "twl");
    }

    #[test]
    fn strips_byte_order_mark_and_whitespace() {
        let csv = "\u{feff} Line Code ,Station ID,English Name,Chinese Name\nISL, 1 ,  Central ,中環\n";
        let (rows, _) = station_rows(csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.get(), 1);
        assert_eq!(rows[0].name_latin, "Central");
        assert_eq!(rows[0].line.as_ref().unwrap().as_str(), "isl");
    }

    #[test]
    fn id_falls_through_aliases() {
        let csv = "Station ID,StationID,English Name,Chinese Name,Line Code\n,7,Lam Tin,藍田,KTL\nx,y,Bad,壞,KTL\n";
        let (rows, stats) = station_rows(csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.get(), 7);
        assert_eq!(stats, RowStats { read: 2, dropped: 1 });
    }

    #[test]
    fn drops_rows_without_valid_id() {
        let csv = "Station ID,English Name,Chinese Name,Line Code\n,Nowhere,無,ISL\n0,Zero,零,ISL\nabc,Letters,字,ISL\n3,Sheung Wan,上環,ISL\n";
        let (rows, stats) = station_rows(csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.get(), 3);
        assert_eq!(stats, RowStats { read: 4, dropped: 3 });
    }

    #[test]
    fn missing_names_default_to_empty() {
        let csv = "Station ID,Line Code\n5,TWL\n";
        let (rows, _) = station_rows(csv);
        assert_eq!(rows[0].name_latin, "");
        assert_eq!(rows[0].name_local, "");
    }

    #[test]
    fn short_rows_are_tolerated() {
        let csv = "Station ID,Line Code,English Name\n5\n6,TWL\n";
        let (rows, stats) = station_rows(csv);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].line.is_none());
        assert_eq!(rows[1].name_latin, "");
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn missing_id_column_is_an_error() {
        let csv = "Code,English Name,Line Code\nADM,Admiralty,ISL\n";
        let err = read_station_rows(csv, &StationAliases::default()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::MissingColumn {
                source_name: "stations",
                field: "station id",
                ..
            }
        ));
    }

    #[test]
    fn reads_fare_rows() {
        let csv = "\
SRC_STATION_NAME,SRC_STATION_ID,DEST_STATION_NAME,DEST_STATION_ID,OCT_ADT_FARE,SINGLE_ADT_FARE
Central,1,Admiralty,2,5.5,6
Central,1,Tsim Sha Tsui,80,N/A,
";
        let (rows, stats) = fare_rows(csv);
        assert_eq!(stats, RowStats { read: 2, dropped: 0 });
        assert_eq!(
            rows,
            vec![
                FareRow {
                    src: "1".to_string(),
                    dest: "2".to_string(),
                    fare: Fare::new(5.5),
                },
                FareRow {
                    src: "1".to_string(),
                    dest: "80".to_string(),
                    fare: None,
                },
            ]
        );
    }

    #[test]
    fn fare_ids_are_opaque() {
        let csv = "SRC_STATION_ID,DEST_STATION_ID,OCT_ADT_FARE\n CEN ,ADM,4.1\n";
        let (rows, _) = fare_rows(csv);
        assert_eq!(rows[0].src, "CEN");
        assert_eq!(rows[0].dest, "ADM");
    }

    #[test]
    fn drops_self_and_blank_fare_rows() {
        let csv = "SRC_STATION_ID,DEST_STATION_ID,OCT_ADT_FARE\n1,1,0\n,2,5\n3,,5\n1,2,5\n";
        let (rows, stats) = fare_rows(csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(stats, RowStats { read: 4, dropped: 3 });
    }

    #[test]
    fn alternate_fare_column() {
        let aliases = FareAliases {
            fare: vec!["SINGLE_ADT_FARE".to_string()],
            ..FareAliases::default()
        };
        let csv = "SRC_STATION_ID,DEST_STATION_ID,OCT_ADT_FARE,SINGLE_ADT_FARE\n1,2,5.5,6\n";
        let (rows, _) = read_fare_rows(csv, &aliases).unwrap();
        assert_eq!(rows[0].fare, Fare::new(6.0));
    }

    #[test]
    fn missing_fare_column_is_an_error() {
        let csv = "SRC_STATION_ID,DEST_STATION_ID\n1,2\n";
        let err = read_fare_rows(csv, &FareAliases::default()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::MissingColumn {
                field: "fare amount",
                ..
            }
        ));
    }
}
