//! Point-to-planning-area assignment.

use geo::Contains;
use rayon::prelude::*;
use tracing::{debug, info};

use super::RegionSet;
use crate::models::{Assignment, GeoPoint};

/// Assigns points to the planning area that contains them.
///
/// Matching policy:
/// - regions are scanned in fetch order and the **first** region whose
///   boundary contains the point wins, so overlapping regions resolve to
///   the earlier one;
/// - containment is `geo::Contains`, which excludes the boundary: a point
///   lying exactly on an edge is not contained by that region;
/// - regions without a boundary never match.
pub struct AreaMatcher<'a> {
    regions: &'a RegionSet,
}

impl<'a> AreaMatcher<'a> {
    pub fn new(regions: &'a RegionSet) -> Self {
        Self { regions }
    }

    /// Name of the first region containing `point`, if any
    pub fn assign(&self, point: GeoPoint) -> Option<&'a str> {
        assign(point, self.regions)
    }

    /// Assign every point, preserving input order.
    ///
    /// Runs in parallel; the region set is only read.
    pub fn assign_all(&self, points: &[GeoPoint]) -> Vec<Assignment> {
        info!(
            "Mapping {} points to {} planning areas...",
            points.len(),
            self.regions.len()
        );

        let assignments: Vec<Assignment> = points
            .par_iter()
            .map(|point| Assignment {
                point: *point,
                region: self.assign(*point).map(str::to_string),
            })
            .collect();

        let unassigned = assignments.iter().filter(|a| a.region.is_none()).count();
        debug!(
            "Assigned {} points, {} outside every planning area",
            assignments.len() - unassigned,
            unassigned
        );

        assignments
    }
}

/// First-match containment scan over `regions` in order
pub fn assign(point: GeoPoint, regions: &RegionSet) -> Option<&str> {
    let geo_point = point.to_geo();
    regions
        .iter()
        .find(|region| {
            region
                .boundary
                .as_ref()
                .map(|boundary| boundary.contains(&geo_point))
                .unwrap_or(false)
        })
        .map(|region| region.name.as_str())
}
