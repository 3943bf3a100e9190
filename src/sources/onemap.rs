//! OneMap planning-area boundaries.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;
use url::Url;

use super::{read_body, RegionSource};
use crate::error::{ConfigError, FetchError};
use crate::models::RegionRecord;

pub const ONEMAP_PLANNING_AREA_ENDPOINT: &str =
    "https://www.onemap.gov.sg/api/public/popapi/getAllPlanningarea";

#[derive(Debug, Deserialize)]
struct PlanningAreaResponse {
    #[serde(rename = "SearchResults")]
    search_results: Vec<PlanningArea>,
}

#[derive(Debug, Deserialize)]
struct PlanningArea {
    pln_area_n: String,
    geojson: Option<String>,
}

/// Fetches planning-area boundaries from the OneMap population API
pub struct OneMapClient {
    client: Client,
    endpoint: Url,
    token: String,
    year: u16,
}

impl OneMapClient {
    pub fn new(
        endpoint: Url,
        token: impl Into<String>,
        year: u16,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            token: token.into(),
            year,
        })
    }
}

impl RegionSource for OneMapClient {
    async fn fetch_regions(&self) -> Result<Vec<RegionRecord>, FetchError> {
        let endpoint = self.endpoint.as_str();
        info!("Fetching planning areas ({}) from {}", self.year, endpoint);

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("year", &self.year.to_string());

        let response = self
            .client
            .get(url)
            .header("Authorization", &self.token)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let body = read_body(endpoint, response).await?;
        let data: PlanningAreaResponse =
            serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let records: Vec<RegionRecord> = data
            .search_results
            .into_iter()
            .map(|area| RegionRecord::new(area.pln_area_n, area.geojson))
            .collect();

        info!("Fetched {} planning areas", records.len());
        Ok(records)
    }
}
