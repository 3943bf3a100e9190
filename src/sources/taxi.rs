//! data.gov.sg taxi availability feed.

use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;
use url::Url;

use super::{read_body, PointSource};
use crate::error::{ConfigError, FetchError};
use crate::models::{GeoPoint, PointBatch};

pub const TAXI_AVAILABILITY_ENDPOINT: &str =
    "https://api.data.gov.sg/v1/transport/taxi-availability";

#[derive(Debug, Deserialize)]
struct TaxiResponse {
    features: Vec<TaxiFeature>,
}

#[derive(Debug, Deserialize)]
struct TaxiFeature {
    geometry: TaxiGeometry,
    #[serde(default)]
    properties: Option<TaxiProperties>,
}

#[derive(Debug, Deserialize)]
struct TaxiGeometry {
    /// `[longitude, latitude]` pairs
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct TaxiProperties {
    timestamp: Option<DateTime<FixedOffset>>,
}

/// Fetches current taxi positions
pub struct TaxiAvailabilityClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl TaxiAvailabilityClient {
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }
}

impl PointSource for TaxiAvailabilityClient {
    async fn fetch_points(&self) -> Result<PointBatch, FetchError> {
        let endpoint = self.endpoint.as_str();
        info!("Fetching taxi availability from {}", endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let body = read_body(endpoint, response).await?;
        let data: TaxiResponse =
            serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let feature = data
            .features
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed {
                endpoint: endpoint.to_string(),
                reason: "no features in response".to_string(),
            })?;

        let points: Vec<GeoPoint> = feature
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| GeoPoint::new(lat, lon))
            .collect();

        let timestamp = feature.properties.and_then(|p| p.timestamp);

        info!("Fetched {} taxi locations", points.len());
        Ok(PointBatch { timestamp, points })
    }
}
