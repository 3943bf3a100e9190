//! Description lookup contract.

use std::future::Future;
use std::time::Duration;

use crate::error::LookupError;
use crate::models::GeoPoint;

/// Description used when a lookup produced nothing usable
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Turns a location into a human-readable description.
pub trait DescriptionLookup: Send + Sync {
    fn describe(
        &self,
        location: GeoPoint,
    ) -> impl Future<Output = Result<String, LookupError>> + Send;
}

/// Outcome of one bounded lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(String),
    Failed(String),
}

impl LookupOutcome {
    pub(crate) fn from_result(result: Result<String, LookupError>) -> Self {
        match result {
            Ok(description) => LookupOutcome::Found(description),
            Err(e) => LookupOutcome::Failed(e.to_string()),
        }
    }

    pub(crate) fn timed_out(after: Duration) -> Self {
        LookupOutcome::Failed(format!("timed out after {:?}", after))
    }
}
