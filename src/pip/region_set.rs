//! Immutable, ordered collection of planning areas.

use tracing::{info, warn};

use super::parse_boundary;
use crate::models::{Region, RegionRecord};

/// Planning areas in the order the source delivered them.
///
/// The order matters: [`AreaMatcher`](super::AreaMatcher) resolves overlaps
/// in favour of the earlier region.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Build from already-parsed regions
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Build from raw records, parsing each boundary.
    ///
    /// A record whose geometry is missing or malformed is kept with an empty
    /// boundary and a warning is logged.
    pub fn from_records(records: Vec<RegionRecord>) -> Self {
        info!("Parsing boundaries for {} planning areas...", records.len());

        let regions: Vec<Region> = records
            .into_iter()
            .map(|record| {
                let boundary = match record.geojson.as_deref() {
                    Some(geojson) => match parse_boundary(geojson) {
                        Ok(multi) => Some(multi),
                        Err(e) => {
                            warn!("Failed to parse geojson for {}: {}", record.name, e);
                            None
                        }
                    },
                    None => {
                        warn!("No geojson for {}", record.name);
                        None
                    }
                };
                Region::new(record.name, boundary)
            })
            .collect();

        let set = Self::new(regions);
        info!(
            "Region set built with {} areas ({} without geometry)",
            set.len(),
            set.without_boundary()
        );
        set
    }

    /// Iterate in fetch order
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of regions that can never match a point
    pub fn without_boundary(&self) -> usize {
        self.regions.iter().filter(|r| !r.has_boundary()).count()
    }
}
