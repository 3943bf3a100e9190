//! Observed vehicle positions.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert to a `geo` point (x = longitude, y = latitude)
    pub fn to_geo(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}

/// One snapshot of available taxis
#[derive(Debug, Clone, Default)]
pub struct PointBatch {
    /// When the upstream feed produced the snapshot, if it said
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub points: Vec<GeoPoint>,
}

impl PointBatch {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self {
            timestamp: None,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_geo_swaps_axes() {
        let p = GeoPoint::new(1.35, 103.8).to_geo();
        assert_eq!(p.x(), 103.8);
        assert_eq!(p.y(), 1.35);
    }
}
