//! Location descriptions for the top-ranked planning areas.
//!
//! Each area's mean taxi position is reverse geocoded through a
//! [`DescriptionLookup`]. The [`ConcurrentEnricher`] bounds how many lookups
//! run at once and contains failures to the entry they belong to.

mod enricher;
mod lookup;
mod nominatim;

pub use enricher::{ConcurrentEnricher, ProgressFn, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_WORKERS};
pub use lookup::{DescriptionLookup, LookupOutcome, UNKNOWN_DESCRIPTION};
pub use nominatim::{NominatimClient, DEFAULT_USER_AGENT, NOMINATIM_REVERSE_ENDPOINT};
