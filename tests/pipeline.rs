use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use taxi_areas::enrich::{ConcurrentEnricher, DescriptionLookup, UNKNOWN_DESCRIPTION};
use taxi_areas::error::{FetchError, LookupError, PipelineError};
use taxi_areas::models::{GeoPoint, PointBatch, RegionRecord};
use taxi_areas::sources::{PointSource, RegionSource};
use taxi_areas::Pipeline;

fn square(min: f64, max: f64) -> String {
    format!(
        r#"{{"type":"Polygon","coordinates":[[[{min},{min}],[{max},{min}],[{max},{max}],[{min},{max}],[{min},{min}]]]}}"#,
        min = min,
        max = max
    )
}

struct StaticRegions(Option<Vec<RegionRecord>>);

impl RegionSource for StaticRegions {
    async fn fetch_regions(&self) -> Result<Vec<RegionRecord>, FetchError> {
        self.0.clone().ok_or_else(|| FetchError::Malformed {
            endpoint: "test://regions".to_string(),
            reason: "unavailable".to_string(),
        })
    }
}

struct StaticPoints(Option<Vec<GeoPoint>>);

impl PointSource for StaticPoints {
    async fn fetch_points(&self) -> Result<PointBatch, FetchError> {
        self.0
            .clone()
            .map(PointBatch::new)
            .ok_or_else(|| FetchError::Status {
                endpoint: "test://points".to_string(),
                status: 503,
            })
    }
}

#[derive(Default)]
struct CountingLookup {
    calls: Arc<AtomicUsize>,
}

impl CountingLookup {
    fn new() -> Self {
        Self::default()
    }
}

impl DescriptionLookup for CountingLookup {
    async fn describe(&self, location: GeoPoint) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{:.1},{:.1}", location.lat, location.lon))
    }
}

struct AlwaysFails;

impl DescriptionLookup for AlwaysFails {
    async fn describe(&self, _location: GeoPoint) -> Result<String, LookupError> {
        Err(LookupError::Status(429))
    }
}

fn regions() -> StaticRegions {
    StaticRegions(Some(vec![
        RegionRecord::new("A", Some(square(0.0, 1.0))),
        RegionRecord::new("BROKEN", Some("{\"type\":".to_string())),
        RegionRecord::new("B", Some(square(2.0, 3.0))),
    ]))
}

fn points() -> StaticPoints {
    StaticPoints(Some(vec![
        GeoPoint::new(0.5, 0.5),
        GeoPoint::new(0.5, 0.5),
        GeoPoint::new(2.5, 2.5),
        GeoPoint::new(9.0, 9.0),
    ]))
}

fn enricher<L: DescriptionLookup + 'static>(lookup: L) -> ConcurrentEnricher<L> {
    ConcurrentEnricher::new(lookup, 2, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_two_area_scenario() {
    let pipeline = Pipeline::new(regions(), points(), enricher(CountingLookup::new()));
    let report = pipeline.run(2).await.unwrap();

    assert_eq!(report.total_points, 4);
    assert_eq!(report.unassigned, 1);
    assert_eq!(report.region_count, 3);
    assert_eq!(report.regions_without_boundary, 1);

    assert_eq!(report.entries.len(), 2);
    let a = &report.entries[0];
    assert_eq!((a.rank, a.aggregate.name.as_str(), a.aggregate.count), (1, "A", 2));
    assert_eq!(a.aggregate.centroid, GeoPoint::new(0.5, 0.5));
    assert_eq!(a.description, "0.5,0.5");

    let b = &report.entries[1];
    assert_eq!((b.rank, b.aggregate.name.as_str(), b.aggregate.count), (2, "B", 1));
    assert_eq!(b.aggregate.centroid, GeoPoint::new(2.5, 2.5));
    assert_eq!(b.description, "2.5,2.5");

    let counted: usize = report.entries.iter().map(|e| e.aggregate.count).sum();
    assert_eq!(counted + report.unassigned, report.total_points);
}

#[tokio::test]
async fn test_zero_k_skips_lookups() {
    let lookup = CountingLookup::new();
    let calls = Arc::clone(&lookup.calls);
    let pipeline = Pipeline::new(regions(), points(), enricher(lookup));
    let report = pipeline.run(0).await.unwrap();

    assert!(report.entries.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.total_points, 4);
}

#[tokio::test]
async fn test_failed_lookups_do_not_fail_run() {
    let pipeline = Pipeline::new(regions(), points(), enricher(AlwaysFails));
    let report = pipeline.run(10).await.unwrap();

    assert_eq!(report.entries.len(), 2);
    for entry in &report.entries {
        assert_eq!(entry.description, UNKNOWN_DESCRIPTION);
        assert!(entry.lookup_failed);
    }
}

#[tokio::test]
async fn test_region_fetch_failure_is_fatal() {
    let pipeline = Pipeline::new(StaticRegions(None), points(), enricher(CountingLookup::new()));
    let result = pipeline.run(5).await;
    assert!(matches!(result, Err(PipelineError::Regions(_))));
}

#[tokio::test]
async fn test_point_fetch_failure_is_fatal() {
    let pipeline = Pipeline::new(regions(), StaticPoints(None), enricher(CountingLookup::new()));
    let result = pipeline.run(5).await;
    assert!(matches!(
        result,
        Err(PipelineError::Points(FetchError::Status { status: 503, .. }))
    ));
}

#[tokio::test]
async fn test_no_regions_leaves_everything_unassigned() {
    let pipeline = Pipeline::new(
        StaticRegions(Some(vec![])),
        points(),
        enricher(CountingLookup::new()),
    );
    let report = pipeline.run(5).await.unwrap();

    assert!(report.entries.is_empty());
    assert_eq!(report.unassigned, 4);
}
