//! Spatial index over world landmarks
//!
//! [`SpatialIndexBuilder`] reads a world source once and produces an
//! immutable [`SpatialIndex`] that answers nearest-feature queries.

pub mod builder;
pub mod index;

pub use builder::{discover_aliases, BuildReport, SpatialIndexBuilder};
pub use index::{nearest, SpatialIndex};
