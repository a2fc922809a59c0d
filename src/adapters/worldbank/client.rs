//! World Bank indicators API client
//!
//! Fetches `{base_url}/country/{country}/indicator/{indicator}` as JSON,
//! following pagination up to `max_pages`. No retries: a failed call is
//! reported once and the caller moves on to its next source.

use super::models::{parse_indicator_payload, IndicatorPage};
use crate::adapters::{IndicatorSource, YearRange};
use crate::config::WorldBankConfig;
use crate::domain::{DebtwatchError, RawObservation, Result, SourceError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// World Bank API client
///
/// # Example
///
/// ```no_run
/// use debtwatch::adapters::worldbank::WorldBankClient;
/// use debtwatch::adapters::{IndicatorSource, YearRange};
/// use debtwatch::config::WorldBankConfig;
///
/// # async fn example() -> debtwatch::domain::Result<()> {
/// let client = WorldBankClient::new(&WorldBankConfig::default())?;
/// let raw = client
///     .try_fetch_series("DT.DOD.DECT.CD", "BGR", YearRange::new(2010, 2027))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorldBankClient {
    base_url: String,
    client: Client,
    per_page: u32,
    max_pages: u32,
}

impl WorldBankClient {
    /// Create a client with the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &WorldBankConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            DebtwatchError::Configuration(format!(
                "Invalid World Bank base URL '{}': {e}",
                config.base_url
            ))
        })?;

        // Responses change as releases land; never let an intermediary serve a stale copy
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .default_headers(headers)
            .user_agent(concat!("debtwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DebtwatchError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            per_page: config.per_page,
            max_pages: config.max_pages,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn series_url(&self, indicator: &str, country: &str) -> std::result::Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::ConnectionFailed(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::ConnectionFailed("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["country", country, "indicator", indicator]);
        Ok(url)
    }

    async fn fetch_page(
        &self,
        url: &Url,
        range: YearRange,
        page: u32,
    ) -> std::result::Result<IndicatorPage, SourceError> {
        tracing::debug!(url = %url, range = %range, page, "Requesting World Bank page");

        let resp = self
            .client
            .get(url.clone())
            .query(&[
                ("format", "json".to_string()),
                ("date", range.to_string()),
                ("per_page", self.per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await
            .map_err(SourceError::from_reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body: serde_json::Value = resp.json().await.map_err(SourceError::from_reqwest)?;
        parse_indicator_payload(&body)
    }
}

#[async_trait]
impl IndicatorSource for WorldBankClient {
    fn name(&self) -> &str {
        "worldbank"
    }

    async fn try_fetch_series(
        &self,
        indicator: &str,
        country: &str,
        range: YearRange,
    ) -> std::result::Result<Vec<RawObservation>, SourceError> {
        let url = self.series_url(indicator, country)?;
        let mut observations = Vec::new();
        let mut page = 1;

        loop {
            let result = self.fetch_page(&url, range, page).await?;
            observations.extend(result.observations);

            if result.info.pages <= page {
                break;
            }
            if page >= self.max_pages {
                tracing::warn!(
                    indicator,
                    pages = result.info.pages,
                    max_pages = self.max_pages,
                    "Indicator has more pages than allowed, truncating"
                );
                break;
            }
            page += 1;
        }

        tracing::debug!(
            indicator,
            country,
            count = observations.len(),
            "Fetched World Bank indicator"
        );

        Ok(observations)
    }
}
