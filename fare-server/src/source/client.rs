//! HTTP client for the transit authority's open-data CSV exports.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

use super::error::SourceError;

/// Default URL of the lines-and-stations export.
const DEFAULT_STATIONS_URL: &str = "https://opendata.mtr.com.hk/data/mtr_lines_and_stations.csv";

/// Default URL of the pairwise fares export.
const DEFAULT_FARES_URL: &str = "https://opendata.mtr.com.hk/data/mtr_lines_fares.csv";

const DEFAULT_USER_AGENT: &str = concat!("fare-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the source client.
#[derive(Debug, Clone)]
pub struct SourceClientConfig {
    /// URL of the stations CSV
    pub stations_url: String,
    /// URL of the fares CSV
    pub fares_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl SourceClientConfig {
    /// Create a config pointing at the given exports.
    pub fn new(stations_url: impl Into<String>, fares_url: impl Into<String>) -> Self {
        Self {
            stations_url: stations_url.into(),
            fares_url: fares_url.into(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for SourceClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STATIONS_URL, DEFAULT_FARES_URL)
    }
}

/// Client that downloads the raw station and fare exports.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: reqwest::Client,
    stations_url: String,
    fares_url: String,
}

impl SourceClient {
    /// Create a new source client.
    pub fn new(config: SourceClientConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| SourceError::Config {
                message: format!("invalid user agent: {:?}", config.user_agent),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            stations_url: config.stations_url,
            fares_url: config.fares_url,
        })
    }

    /// Fetch the raw stations CSV.
    pub async fn fetch_stations(&self) -> Result<String, SourceError> {
        info!(url = %self.stations_url, "fetching stations CSV");
        self.fetch_text(&self.stations_url).await
    }

    /// Fetch the raw fares CSV.
    pub async fn fetch_fares(&self) -> Result<String, SourceError> {
        info!(url = %self.fares_url, "fetching fares CSV");
        self.fetch_text(&self.fares_url).await
    }

    async fn fetch_text(&self, url: &str) -> Result<String, SourceError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                url: url.to_string(),
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("").to_string()
                } else {
                    body
                },
            });
        }

        let body = response.text().await?;
        debug!(url, bytes = body.len(), "fetched source");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = SourceClientConfig::default();
        assert_eq!(config.stations_url, DEFAULT_STATIONS_URL);
        assert_eq!(config.fares_url, DEFAULT_FARES_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("fare-server/"));
    }

    #[test]
    fn config_with_custom_urls() {
        let config =
            SourceClientConfig::new("http://localhost:8080/s.csv", "http://localhost:8080/f.csv")
                .with_timeout_secs(5);
        assert_eq!(config.stations_url, "http://localhost:8080/s.csv");
        assert_eq!(config.fares_url, "http://localhost:8080/f.csv");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn rejects_invalid_user_agent() {
        let mut config = SourceClientConfig::default();
        config.user_agent = "bad\nagent".to_string();
        assert!(matches!(
            SourceClient::new(config),
            Err(SourceError::Config { .. })
        ));
    }
}
