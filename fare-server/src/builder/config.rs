//! Builder configuration: header aliases and line exclusions.

/// Ordered header aliases for the stations export.
///
/// Earlier aliases take precedence over later ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationAliases {
    pub id: Vec<String>,
    pub name_latin: Vec<String>,
    pub name_local: Vec<String>,
    pub line: Vec<String>,
}

impl Default for StationAliases {
    fn default() -> Self {
        Self {
            id: strings(&["Station ID", "StationID"]),
            name_latin: strings(&["English Name", "EnglishName"]),
            name_local: strings(&["Chinese Name", "ChineseName"]),
            line: strings(&["Line Code", "LineCode"]),
        }
    }
}

/// Ordered header aliases for the fares export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareAliases {
    pub src: Vec<String>,
    pub dest: Vec<String>,
    /// Fare amount column. Defaults to the adult Octopus fare.
    pub fare: Vec<String>,
}

impl Default for FareAliases {
    fn default() -> Self {
        Self {
            src: strings(&["SRC_STATION_ID"]),
            dest: strings(&["DEST_STATION_ID"]),
            fare: strings(&["OCT_ADT_FARE"]),
        }
    }
}

/// Configuration for a build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    pub stations: StationAliases,
    pub fares: FareAliases,

    /// Line codes whose rows are skipped entirely (lower-case).
    /// The Airport Express is priced separately, so it is excluded by default.
    pub excluded_lines: Vec<String>,
}

impl BuilderConfig {
    /// Build a different fare product, e.g. `SINGLE_ADT_FARE`.
    pub fn with_fare_column(mut self, column: impl Into<String>) -> Self {
        self.fares.fare = vec![column.into()];
        self
    }

    /// Replace the excluded line codes.
    pub fn with_excluded_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_lines = lines
            .into_iter()
            .map(|l| l.as_ref().trim().to_lowercase())
            .collect();
        self
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            stations: StationAliases::default(),
            fares: FareAliases::default(),
            excluded_lines: strings(&["ael"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BuilderConfig::default();

        assert_eq!(config.stations.id, vec!["Station ID", "StationID"]);
        assert_eq!(config.stations.line, vec!["Line Code", "LineCode"]);
        assert_eq!(config.fares.fare, vec!["OCT_ADT_FARE"]);
        assert_eq!(config.excluded_lines, vec!["ael"]);
    }

    #[test]
    fn custom_config() {
        let config = BuilderConfig::default()
            .with_fare_column("SINGLE_ADT_FARE")
            .with_excluded_lines([" AEL ", "DRL"]);

        assert_eq!(config.fares.fare, vec!["SINGLE_ADT_FARE"]);
        assert_eq!(config.excluded_lines, vec!["ael", "drl"]);
    }

    #[test]
    fn no_exclusions() {
        let config = BuilderConfig::default().with_excluded_lines(Vec::<String>::new());
        assert!(config.excluded_lines.is_empty());
    }
}
