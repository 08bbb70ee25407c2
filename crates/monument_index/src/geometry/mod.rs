//! Landmark footprint geometry
//!
//! - [`BoundingVolume`] - oriented box with containment and closest-point tests
//! - [`LocalBounds`] - bounds declared relative to an owner's pose

mod bounding_volume;

pub use bounding_volume::{BoundingVolume, LocalBounds};
