//! Per-area counts and top-K ranking.

use hashbrown::HashMap;
use tracing::{debug, info};

use crate::models::{Assignment, GeoPoint, RegionAggregate};

/// Result of aggregating a full set of assignments
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Top-K areas, highest count first
    pub ranked: Vec<RegionAggregate>,
    /// Number of input points
    pub total_points: usize,
    /// Points that fell outside every area
    pub unassigned: usize,
    /// Distinct areas with at least one point, before truncation
    pub distinct_regions: usize,
}

/// Groups assignments by area and keeps the `top_k` largest groups.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    top_k: usize,
}

#[derive(Debug)]
struct Group<'a> {
    name: &'a str,
    count: usize,
    lat_sum: f64,
    lon_sum: f64,
}

impl Aggregator {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Count points per area and rank areas by count.
    ///
    /// Ties keep the order in which each area first appeared in
    /// `assignments`. `top_k == 0` yields an empty ranking.
    pub fn aggregate(&self, assignments: &[Assignment]) -> Aggregation {
        let mut groups: Vec<Group<'_>> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut unassigned = 0;

        for assignment in assignments {
            let Some(name) = assignment.region.as_deref() else {
                unassigned += 1;
                continue;
            };

            let slot = *index.entry(name).or_insert_with(|| {
                groups.push(Group {
                    name,
                    count: 0,
                    lat_sum: 0.0,
                    lon_sum: 0.0,
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.count += 1;
            group.lat_sum += assignment.point.lat;
            group.lon_sum += assignment.point.lon;
        }

        let distinct_regions = groups.len();

        // Stable: equal counts stay in first-occurrence order
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups.truncate(self.top_k);

        let ranked: Vec<RegionAggregate> = groups
            .into_iter()
            .map(|g| {
                let n = g.count as f64;
                RegionAggregate {
                    name: g.name.to_string(),
                    count: g.count,
                    centroid: GeoPoint::new(g.lat_sum / n, g.lon_sum / n),
                }
            })
            .collect();

        for (i, entry) in ranked.iter().enumerate() {
            debug!("#{} {} ({} points)", i + 1, entry.name, entry.count);
        }
        info!(
            "Aggregated {} points into {} areas ({} unassigned), keeping top {}",
            assignments.len(),
            distinct_regions,
            unassigned,
            ranked.len()
        );

        Aggregation {
            ranked,
            total_points: assignments.len(),
            unassigned,
            distinct_regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned(lat: f64, lon: f64, region: Option<&str>) -> Assignment {
        Assignment {
            point: GeoPoint::new(lat, lon),
            region: region.map(str::to_string),
        }
    }

    fn sample() -> Vec<Assignment> {
        vec![
            assigned(0.5, 0.5, Some("A")),
            assigned(0.5, 0.5, Some("A")),
            assigned(2.5, 2.5, Some("B")),
            assigned(9.0, 9.0, None),
        ]
    }

    #[test]
    fn test_two_area_scenario() {
        let result = Aggregator::new(2).aggregate(&sample());

        assert_eq!(
            result.ranked,
            vec![
                RegionAggregate {
                    name: "A".to_string(),
                    count: 2,
                    centroid: GeoPoint::new(0.5, 0.5),
                },
                RegionAggregate {
                    name: "B".to_string(),
                    count: 1,
                    centroid: GeoPoint::new(2.5, 2.5),
                },
            ]
        );
        assert_eq!(result.unassigned, 1);
        assert_eq!(result.total_points, 4);
    }

    #[test]
    fn test_counts_plus_unassigned_equal_total() {
        let result = Aggregator::new(usize::MAX).aggregate(&sample());
        let counted: usize = result.ranked.iter().map(|r| r.count).sum();
        assert_eq!(counted + result.unassigned, result.total_points);
    }

    #[test]
    fn test_zero_k_is_empty() {
        let result = Aggregator::new(0).aggregate(&sample());
        assert!(result.ranked.is_empty());
        assert_eq!(result.distinct_regions, 2);
        assert_eq!(result.unassigned, 1);
    }

    #[test]
    fn test_k_larger_than_regions_returns_all() {
        let result = Aggregator::new(50).aggregate(&sample());
        assert_eq!(result.ranked.len(), 2);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let input = vec![
            assigned(0.0, 0.0, Some("C")),
            assigned(0.0, 0.0, Some("A")),
            assigned(0.0, 0.0, Some("B")),
            assigned(0.0, 0.0, Some("B")),
            assigned(0.0, 0.0, Some("A")),
            assigned(0.0, 0.0, Some("C")),
            assigned(0.0, 0.0, Some("D")),
        ];
        let result = Aggregator::new(10).aggregate(&input);
        let names: Vec<&str> = result.ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_sorted_by_count_descending() {
        let input = vec![
            assigned(0.0, 0.0, Some("X")),
            assigned(0.0, 0.0, Some("Y")),
            assigned(0.0, 0.0, Some("Y")),
            assigned(0.0, 0.0, Some("Z")),
            assigned(0.0, 0.0, Some("Z")),
            assigned(0.0, 0.0, Some("Z")),
        ];
        let result = Aggregator::new(2).aggregate(&input);
        let names: Vec<&str> = result.ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "Y"]);
    }

    #[test]
    fn test_centroid_is_mean() {
        let input = vec![
            assigned(1.0, 10.0, Some("A")),
            assigned(3.0, 20.0, Some("A")),
        ];
        let result = Aggregator::new(1).aggregate(&input);
        assert_eq!(result.ranked[0].centroid, GeoPoint::new(2.0, 15.0));
    }

    #[test]
    fn test_all_unassigned() {
        let input = vec![assigned(9.0, 9.0, None), assigned(8.0, 8.0, None)];
        let result = Aggregator::new(3).aggregate(&input);
        assert!(result.ranked.is_empty());
        assert_eq!(result.unassigned, 2);
    }
}
