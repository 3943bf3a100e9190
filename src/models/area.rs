//! Planning-area regions.

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// A planning area as delivered by the region source, geometry still unparsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    /// Raw GeoJSON geometry; absent when the source sent nothing
    pub geojson: Option<String>,
}

impl RegionRecord {
    pub fn new(name: impl Into<String>, geojson: Option<String>) -> Self {
        Self {
            name: name.into(),
            geojson,
        }
    }
}

/// A named planning area with its parsed boundary.
///
/// Regions whose geometry could not be parsed keep `boundary: None` and
/// never contain any point.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub boundary: Option<MultiPolygon<f64>>,
}

impl Region {
    pub fn new(name: impl Into<String>, boundary: Option<MultiPolygon<f64>>) -> Self {
        Self {
            name: name.into(),
            boundary,
        }
    }

    pub fn has_boundary(&self) -> bool {
        self.boundary.is_some()
    }
}
