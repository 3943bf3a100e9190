//! Run configuration.
//!
//! Everything has a default; a TOML file may override any field:
//!
//! ```toml
//! [sources]
//! planning_area_year = 2019
//! fetch_timeout_secs = 15
//!
//! [enrich]
//! workers = 2
//! timeout_secs = 20
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::enrich::{
    DEFAULT_LOOKUP_TIMEOUT, DEFAULT_USER_AGENT, DEFAULT_WORKERS, NOMINATIM_REVERSE_ENDPOINT,
};
use crate::error::ConfigError;
use crate::sources::{DEFAULT_FETCH_TIMEOUT, ONEMAP_PLANNING_AREA_ENDPOINT, TAXI_AVAILABILITY_ENDPOINT};

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_PLANNING_AREA_YEAR: u16 = 2019;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub enrich: EnrichConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    pub planning_area_url: String,
    pub planning_area_year: u16,
    pub taxi_url: String,
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichConfig {
    pub reverse_url: String,
    pub user_agent: String,
    pub workers: usize,
    pub timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            planning_area_url: ONEMAP_PLANNING_AREA_ENDPOINT.to_string(),
            planning_area_year: DEFAULT_PLANNING_AREA_YEAR,
            taxi_url: TAXI_AVAILABILITY_ENDPOINT.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
        }
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            reverse_url: NOMINATIM_REVERSE_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            workers: DEFAULT_WORKERS,
            timeout_secs: DEFAULT_LOOKUP_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check the values that cannot be fixed up later
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sources.planning_area_endpoint()?;
        self.sources.taxi_endpoint()?;
        self.enrich.reverse_endpoint()?;
        if self.enrich.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

impl SourcesConfig {
    pub fn planning_area_endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("planning_area_url", &self.planning_area_url)
    }

    pub fn taxi_endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("taxi_url", &self.taxi_url)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl EnrichConfig {
    pub fn reverse_endpoint(&self) -> Result<Url, ConfigError> {
        parse_url("reverse_url", &self.reverse_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}
