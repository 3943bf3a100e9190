//! Taxi Areas - taxi availability by Singapore planning area
//!
//! Assigns live taxi positions to planning-area polygons, ranks the areas by
//! taxi count and attaches a reverse-geocoded description to the top K.

pub mod aggregate;
pub mod config;
pub mod enrich;
pub mod error;
pub mod models;
pub mod pip;
pub mod pipeline;
pub mod sources;

pub use models::{EnrichedEntry, GeoPoint, Region, RegionAggregate};
pub use pipeline::{Pipeline, Report};
