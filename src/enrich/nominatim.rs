//! Reverse geocoding against a Nominatim endpoint.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{DescriptionLookup, UNKNOWN_DESCRIPTION};
use crate::error::{ConfigError, LookupError};
use crate::models::GeoPoint;

pub const NOMINATIM_REVERSE_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Zoom 16 resolves to roughly street level
const ZOOM: &str = "16";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

/// Fetches a display name for a coordinate from Nominatim
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    endpoint: Url,
}

impl NominatimClient {
    /// `timeout` caps the HTTP exchange; the enricher applies its own
    /// per-lookup deadline on top.
    pub fn new(endpoint: Url, user_agent: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

impl DescriptionLookup for NominatimClient {
    async fn describe(&self, location: GeoPoint) -> Result<String, LookupError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("lat", &location.lat.to_string())
            .append_pair("lon", &location.lon.to_string())
            .append_pair("zoom", ZOOM)
            .append_pair("addressdetails", "1");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let data: ReverseResponse = serde_json::from_str(&body)?;

        debug!(
            "Reverse geocoded {},{}: {:?}",
            location.lat, location.lon, data.display_name
        );

        Ok(data
            .display_name
            .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string()))
    }
}
