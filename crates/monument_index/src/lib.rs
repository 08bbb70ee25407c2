//! # Monument Index
//!
//! Nearest-landmark queries for a loaded game world.
//!
//! ## Features
//!
//! - **Unified landmarks**: monuments, train tunnel segments and underwater
//!   facility modules share one `Feature` type
//! - **Oriented bounds**: containment and closest-point tests on rotated boxes
//! - **Aliases**: monuments spawned inside a larger prefab take its name
//! - **Snapshots**: RON/TOML world captures stand in for a live world
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use monument_index::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut service = MonumentService::new(MonumentIndexConfig::default())?;
//!     let index = service.load_snapshot_file("world.ron")?;
//!
//!     println!("{}", where_am_i(&index, &Point3::new(120.0, 4.0, -35.0)));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod features;
pub mod foundation;
pub mod geometry;
pub mod service;
pub mod spatial;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{FeatureError, MonumentError, WorldSourceError};
pub use service::MonumentService;

/// Common imports for index users
pub mod prelude {
    pub use crate::{
        commands::{find_nearest, where_am_i, FeatureHandle, LocationReport},
        config::{Config, ConfigError, MonumentIndexConfig},
        features::{Feature, FeatureKind, FeatureKinds},
        foundation::math::{Point3, Pose, Quat, Vec3},
        geometry::{BoundingVolume, LocalBounds},
        spatial::{BuildReport, SpatialIndex, SpatialIndexBuilder},
        world::{WorldSnapshot, WorldSource},
        FeatureError, MonumentError, MonumentService, WorldSourceError,
    };
}
