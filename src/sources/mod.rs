//! Dataset sources: planning-area boundaries and taxi positions.
//!
//! Both are fetched once per run. Failure of either is fatal.

mod onemap;
mod taxi;

use std::future::Future;

use crate::error::FetchError;
use crate::models::{PointBatch, RegionRecord};

pub use onemap::{OneMapClient, ONEMAP_PLANNING_AREA_ENDPOINT};
pub use taxi::{TaxiAvailabilityClient, TAXI_AVAILABILITY_ENDPOINT};

/// Timeout used for dataset requests unless configured otherwise
pub const DEFAULT_FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

/// Provides planning areas in a stable order
pub trait RegionSource: Send + Sync {
    fn fetch_regions(&self) -> impl Future<Output = Result<Vec<RegionRecord>, FetchError>> + Send;
}

/// Provides the current set of observed points
pub trait PointSource: Send + Sync {
    fn fetch_points(&self) -> impl Future<Output = Result<PointBatch, FetchError>> + Send;
}

/// Read a response body, mapping transport errors and non-2xx statuses
async fn read_body(endpoint: &str, response: reqwest::Response) -> Result<String, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FetchError::Transport {
        endpoint: endpoint.to_string(),
        source,
    })
}
