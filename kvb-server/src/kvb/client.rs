//! KVB website HTTP client.
//!
//! Fetches the per-station overview page and extracts its timetable
//! rows. The User-Agent rotates per request across a fixed pool to
//! reduce fetch blocking by the upstream site; this is not a security
//! control.

use rand::Rng;
use reqwest::header;

use crate::stations::StationId;

use super::error::KvbError;
use super::parse::{RawDepartureRow, extract_rows};

/// Default base URL of the operator's website.
const DEFAULT_BASE_URL: &str = "https://www.kvb.koeln";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Fixed pool of desktop browser User-Agent strings.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/60.0.3112.113 Safari/537.36",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/60.0.3112.90 Safari/537.36",
    "Mozilla/5.0 (Windows NT 6.2; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/60.0.3112.90 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/44.0.2403.157 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/57.0.2987.133 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/55.0.2883.87 Safari/537.36",
    "Mozilla/4.0 (compatible; MSIE 9.0; Windows NT 6.1)",
    "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (Windows NT 6.3; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.1; Trident/6.0)",
];

/// Configuration for the KVB website client.
#[derive(Debug, Clone)]
pub struct KvbConfig {
    /// Base URL of the operator's website
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl KvbConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for KvbConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the operator's per-station timetable pages.
#[derive(Debug, Clone)]
pub struct KvbClient {
    http: reqwest::Client,
    base_url: String,
}

impl KvbClient {
    /// Create a new client with the given configuration.
    pub fn new(config: KvbConfig) -> Result<Self, KvbError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the timetable rows for a station, in document order.
    ///
    /// A page without a results table (unknown station, upstream
    /// markup change) yields an empty vec; transport failures and
    /// non-2xx statuses are errors. Live departures are never cached.
    pub async fn fetch_departures(
        &self,
        station_id: StationId,
    ) -> Result<Vec<RawDepartureRow>, KvbError> {
        let url = format!("{}/haltestellen/overview/{}/", self.base_url, station_id);

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, random_user_agent())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KvbError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(extract_rows(&body))
    }
}

/// Pick a User-Agent from the pool, uniformly at random.
fn random_user_agent() -> &'static str {
    USER_AGENTS[rand::thread_rng().gen_range(0..USER_AGENTS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn config_defaults() {
        let config = KvbConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_builder() {
        let config = KvbConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn user_agent_pool_is_sane() {
        assert!(!USER_AGENTS.is_empty());
        for _ in 0..50 {
            assert!(USER_AGENTS.contains(&random_user_agent()));
        }
    }

    fn client_for(server: &MockServer) -> KvbClient {
        KvbClient::new(KvbConfig::new().with_base_url(server.base_url())).unwrap()
    }

    #[tokio::test]
    async fn fetch_parses_timetable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/haltestellen/overview/46/");
                then.status(200).body(
                    "<table>\
                     <tr><td>1</td><td>Bensberg</td><td>3\u{a0}Min</td></tr>\
                     <tr><td>7</td><td>Porz Markt</td><td>Sofort</td></tr>\
                     </table>",
                );
            })
            .await;

        let rows = client_for(&server).fetch_departures(46).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, "1");
        assert_eq!(rows[0].departs_in_raw, "3 Min");
        assert_eq!(rows[1].departs_in_raw, "Sofort");
    }

    #[tokio::test]
    async fn fetch_sends_pooled_user_agent() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/haltestellen/overview/46/")
                    .header_exists("user-agent");
                then.status(200).body("<table></table>");
            })
            .await;

        client_for(&server).fetch_departures(46).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_table_yields_empty_not_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/haltestellen/overview/9999/");
                then.status(200).body("<html><body>Keine Daten</body></html>");
            })
            .await;

        let rows = client_for(&server).fetch_departures(9999).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn upstream_error_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/haltestellen/overview/46/");
                then.status(503);
            })
            .await;

        let err = client_for(&server).fetch_departures(46).await.unwrap_err();
        assert!(matches!(err, KvbError::Upstream { status: 503 }));
    }
}
