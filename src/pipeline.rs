//! End-to-end run: fetch, assign, aggregate, enrich.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::info;

use crate::aggregate::Aggregator;
use crate::enrich::{ConcurrentEnricher, DescriptionLookup};
use crate::error::PipelineError;
use crate::models::EnrichedEntry;
use crate::pip::{AreaMatcher, RegionSet};
use crate::sources::{PointSource, RegionSource};

/// Everything the presentation layer needs from one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Snapshot time reported by the taxi feed
    pub fetched_at: Option<DateTime<FixedOffset>>,
    pub total_points: usize,
    pub unassigned: usize,
    pub region_count: usize,
    pub regions_without_boundary: usize,
    pub entries: Vec<EnrichedEntry>,
}

/// Wires the dataset sources to the matcher, aggregator and enricher
pub struct Pipeline<R, P, L> {
    regions: R,
    points: P,
    enricher: ConcurrentEnricher<L>,
}

impl<R, P, L> Pipeline<R, P, L>
where
    R: RegionSource,
    P: PointSource,
    L: DescriptionLookup + 'static,
{
    pub fn new(regions: R, points: P, enricher: ConcurrentEnricher<L>) -> Self {
        Self {
            regions,
            points,
            enricher,
        }
    }

    /// Run once for the `top_k` busiest areas.
    ///
    /// Fails only if a dataset cannot be fetched. Bad geometry and failed
    /// lookups degrade the output instead.
    pub async fn run(&self, top_k: usize) -> Result<Report, PipelineError> {
        let records = self
            .regions
            .fetch_regions()
            .await
            .map_err(PipelineError::Regions)?;
        let region_set = RegionSet::from_records(records);

        let batch = self
            .points
            .fetch_points()
            .await
            .map_err(PipelineError::Points)?;

        let assignments = AreaMatcher::new(&region_set).assign_all(&batch.points);
        let aggregation = Aggregator::new(top_k).aggregate(&assignments);

        let entries = self.enricher.enrich(&aggregation.ranked).await;

        info!(
            "Run complete: {} taxis, {} areas reported",
            aggregation.total_points,
            entries.len()
        );

        Ok(Report {
            fetched_at: batch.timestamp,
            total_points: aggregation.total_points,
            unassigned: aggregation.unassigned,
            region_count: region_set.len(),
            regions_without_boundary: region_set.without_boundary(),
            entries,
        })
    }
}
