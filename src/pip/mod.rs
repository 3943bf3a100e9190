//! Point-in-Polygon (PIP) planning-area assignment.
//!
//! Parses planning-area boundaries and assigns each point to the first
//! area containing it. A linear scan is enough at this scale (tens of
//! areas, hundreds of points), so there is no spatial index.

mod boundary;
mod matcher;
mod region_set;

pub use boundary::parse_boundary;
pub use matcher::{assign, AreaMatcher};
pub use region_set::RegionSet;
