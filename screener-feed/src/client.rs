//! HTTP client for the bridge rows endpoint.

use crate::config::BridgeConfig;
use crate::error::FeedError;
use reqwest::Client;
use screener_core::row::{normalize_rows, ScreenRow};
use tracing::debug;
use url::Url;

/// Thin client over the bridge API. Fetches raw JSON row arrays and runs
/// them through the core ingestion boundary.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: Client,
    rows_url: Url,
}

impl BridgeClient {
    pub fn new(config: &BridgeConfig) -> Result<Self, FeedError> {
        let base = Url::parse(&config.base_url)?;
        let rows_url = base.join(&config.rows_path)?;
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { http, rows_url })
    }

    /// Fetch one snapshot of screening rows.
    ///
    /// The bridge returns a JSON array of loosely-cased row objects;
    /// normalization drops entries without a resolvable ticker.
    pub async fn fetch_rows(&self) -> Result<Vec<ScreenRow>, FeedError> {
        let response = self
            .http
            .get(self.rows_url.clone())
            .send()
            .await?
            .error_for_status()?;
        let payload: serde_json::Value = response.json().await?;
        let raw_rows = payload
            .as_array()
            .ok_or_else(|| FeedError::Decode("expected a JSON array".to_string()))?;
        let rows = normalize_rows(raw_rows);
        debug!(url = %self.rows_url, rows = rows.len(), "fetched row snapshot");
        Ok(rows)
    }
}
