//! Bounded-concurrency enrichment of ranked areas.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::{DescriptionLookup, LookupOutcome, UNKNOWN_DESCRIPTION};
use crate::error::ConfigError;
use crate::models::{EnrichedEntry, RegionAggregate};

pub const DEFAULT_WORKERS: usize = 2;
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(20);

/// Called with `(completed, total)` after each lookup finishes
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Looks up a description for each ranked area.
///
/// At most `workers` lookups are in flight at once. Each lookup gets its own
/// deadline, counted from when it acquires a worker slot. Any failure
/// becomes the [`UNKNOWN_DESCRIPTION`] placeholder for that entry only.
pub struct ConcurrentEnricher<L> {
    lookup: Arc<L>,
    workers: usize,
    timeout: Duration,
    on_progress: Option<ProgressFn>,
}

impl<L> ConcurrentEnricher<L>
where
    L: DescriptionLookup + 'static,
{
    pub fn new(lookup: L, workers: usize, timeout: Duration) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(Self {
            lookup: Arc::new(lookup),
            workers,
            timeout,
            on_progress: None,
        })
    }

    /// Report progress through `callback`
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Enrich `ranked` in order.
    ///
    /// Returns one entry per input, `output[i].aggregate == ranked[i]` and
    /// `output[i].rank == i + 1`, whatever order the lookups complete in.
    /// Waits for every lookup before returning.
    pub async fn enrich(&self, ranked: &[RegionAggregate]) -> Vec<EnrichedEntry> {
        let mut entries: Vec<EnrichedEntry> = ranked
            .iter()
            .enumerate()
            .map(|(i, aggregate)| EnrichedEntry::pending(i + 1, aggregate.clone()))
            .collect();

        let total = entries.len();
        if total == 0 {
            return entries;
        }

        info!(
            "Fetching descriptions for {} areas ({} workers)...",
            total, self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for (idx, entry) in entries.iter().enumerate() {
            let lookup = Arc::clone(&self.lookup);
            let semaphore = Arc::clone(&semaphore);
            let location = entry.aggregate.centroid;
            let timeout = self.timeout;

            tasks.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        match tokio::time::timeout(timeout, lookup.describe(location)).await {
                            Ok(result) => LookupOutcome::from_result(result),
                            Err(_) => LookupOutcome::timed_out(timeout),
                        }
                    }
                    Err(_) => LookupOutcome::Failed("worker pool closed".to_string()),
                };
                (idx, outcome)
            });
        }

        // One slot per entry, written once by the task that owns its index
        let mut slots: Vec<Option<LookupOutcome>> = vec![None; total];
        let mut completed = 0;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, outcome)) => slots[idx] = Some(outcome),
                Err(e) => error!("Description task failed: {}", e),
            }
            completed += 1;
            debug!("Descriptions: {}/{} complete", completed, total);
            if let Some(ref callback) = self.on_progress {
                callback(completed, total);
            }
        }

        let mut failures = 0;
        for (entry, slot) in entries.iter_mut().zip(slots) {
            let outcome =
                slot.unwrap_or_else(|| LookupOutcome::Failed("task did not complete".to_string()));
            match outcome {
                LookupOutcome::Found(description) => entry.description = description,
                LookupOutcome::Failed(reason) => {
                    warn!(
                        "Reverse geocoding failed for {},{} ({}): {}",
                        entry.aggregate.centroid.lat,
                        entry.aggregate.centroid.lon,
                        entry.aggregate.name,
                        reason
                    );
                    entry.description = UNKNOWN_DESCRIPTION.to_string();
                    entry.lookup_failed = true;
                    failures += 1;
                }
            }
        }

        info!(
            "Descriptions complete: {} found, {} failed",
            total - failures,
            failures
        );

        entries
    }
}
