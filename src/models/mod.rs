//! Core data models for the taxi/planning-area analysis.

pub mod area;
pub mod point;
pub mod ranking;

pub use area::{Region, RegionRecord};
pub use point::{GeoPoint, PointBatch};
pub use ranking::{maps_link, Assignment, EnrichedEntry, RegionAggregate};
