//! Derived records: assignments, per-area aggregates and enriched rows.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// A point together with the planning area that contains it, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub point: GeoPoint,
    pub region: Option<String>,
}

/// Count and mean position of all points assigned to one planning area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAggregate {
    pub name: String,
    pub count: usize,
    /// Arithmetic mean of the member points, not the polygon centroid
    pub centroid: GeoPoint,
}

/// A ranked planning area with its looked-up location description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEntry {
    /// 1-based position in the top-K ranking
    pub rank: usize,
    #[serde(flatten)]
    pub aggregate: RegionAggregate,
    pub description: String,
    /// Set when `description` is the failure placeholder
    pub lookup_failed: bool,
}

impl EnrichedEntry {
    /// Create an entry whose description has not been filled yet
    pub fn pending(rank: usize, aggregate: RegionAggregate) -> Self {
        Self {
            rank,
            aggregate,
            description: String::new(),
            lookup_failed: false,
        }
    }

    pub fn maps_link(&self) -> String {
        maps_link(self.aggregate.centroid)
    }
}

/// Google Maps search URL centred on a location
pub fn maps_link(location: GeoPoint) -> String {
    format!("{}{},{}", MAPS_SEARCH_URL, location.lat, location.lon)
}
