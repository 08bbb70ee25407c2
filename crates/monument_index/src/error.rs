//! Error types for the monument index
//!
//! Adapter failures are per-object and never abort an index build; the
//! service-level error only covers things that stop a build from starting.

use thiserror::Error;

use crate::config::ConfigError;

/// Failure to turn one raw world object into a feature
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// The object has no usable bounding volume
    #[error("feature '{0}' has no geometry")]
    NoGeometry(String),

    /// Position or rotation contains NaN or infinity
    #[error("feature '{0}' has a non-finite pose")]
    NonFinitePose(String),

    /// A bounding volume was declared with negative or non-finite extents
    #[error("invalid half-extents ({x}, {y}, {z})")]
    InvalidExtents {
        /// X half-extent
        x: f32,
        /// Y half-extent
        y: f32,
        /// Z half-extent
        z: f32,
    },
}

/// Failure to read landmark data from the world
#[derive(Error, Debug)]
pub enum WorldSourceError {
    /// The accessor for this category is not available in the running world
    #[error("world accessor unavailable: {0}")]
    Unavailable(String),

    /// IO error while reading a world snapshot
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Snapshot file extension is not recognised
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Service-level errors
#[derive(Error, Debug)]
pub enum MonumentError {
    /// The subsystem is switched off in configuration
    #[error("monument index is disabled")]
    Disabled,

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// World data could not be read
    #[error("World source error: {0}")]
    WorldSource(#[from] WorldSourceError),
}
