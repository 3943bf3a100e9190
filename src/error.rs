//! Error types shared by the library modules.
//!
//! Only dataset fetch failures are fatal. Geometry and lookup errors are
//! caught where they happen and turned into degraded data.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to retrieve one of the input datasets.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

/// A region boundary that could not be turned into a polygon.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported geometry type (expected Polygon or MultiPolygon)")]
    UnsupportedType,

    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("position has {0} values, need at least 2")]
    InvalidPosition(usize),

    #[error("ring has {0} positions after closing, need at least 4")]
    RingTooShort(usize),

    #[error("geometry contains no polygons")]
    Empty,
}

/// A single description lookup that did not produce a result.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Invalid configuration, detected before any network traffic.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field} URL {value:?}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("worker bound must be at least 1")]
    ZeroWorkers,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Fatal pipeline failure. The run produces no output.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("error fetching planning areas: {0}")]
    Regions(#[source] FetchError),

    #[error("error fetching taxi availability: {0}")]
    Points(#[source] FetchError),
}
