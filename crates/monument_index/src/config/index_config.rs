//! # Monument Index Configuration
//!
//! Tunables for how raw world objects are turned into indexed features.
//! Every field has a default, so a config file only needs to list what it
//! overrides.

use serde::{Serialize, Deserialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// Default footprint of a train tunnel segment (width, height, depth)
pub const DEFAULT_TUNNEL_SEGMENT_SIZE: [f32; 3] = [20.0, 10.0, 20.0];

/// Tunnel cells that only join two tunnel directions together
pub const DEFAULT_TRANSITION_SEGMENTS: [&str; 4] = [
    "transition-sn-0",
    "transition-sn-1",
    "transition-we-0",
    "transition-we-1",
];

/// Child object suffix that tags a monument marker
pub const DEFAULT_MONUMENT_MARKER_SUFFIX: &str = "monument_marker.prefab";

/// File-type suffix stripped when deriving short names
pub const DEFAULT_PREFAB_EXTENSION: &str = ".prefab";

/// Settings for the monument index subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonumentIndexConfig {
    /// Whether the subsystem builds an index at all
    pub enabled: bool,
    /// Full size of the synthetic tunnel segment box
    pub tunnel_segment_size: [f32; 3],
    /// Tunnel cell short names that are never indexed
    pub transition_segment_denylist: Vec<String>,
    /// Name suffix identifying monument marker children during alias discovery
    pub monument_marker_suffix: String,
    /// Extension removed from the last path segment to form a short name
    pub prefab_extension: String,
}

impl MonumentIndexConfig {
    /// Create a configuration with the stock values
    pub fn new() -> Self {
        Self {
            enabled: true,
            tunnel_segment_size: DEFAULT_TUNNEL_SEGMENT_SIZE,
            transition_segment_denylist: DEFAULT_TRANSITION_SEGMENTS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            monument_marker_suffix: DEFAULT_MONUMENT_MARKER_SUFFIX.to_string(),
            prefab_extension: DEFAULT_PREFAB_EXTENSION.to_string(),
        }
    }

    /// Enable or disable the subsystem
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the tunnel segment footprint
    pub fn with_tunnel_segment_size(mut self, size: [f32; 3]) -> Self {
        self.tunnel_segment_size = size;
        self
    }

    /// Replace the transition segment denylist
    pub fn with_transition_denylist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transition_segment_denylist = names.into_iter().map(Into::into).collect();
        self
    }

    /// Half-extents of the synthetic tunnel segment volume
    pub fn tunnel_half_extents(&self) -> Vec3 {
        Vec3::from(self.tunnel_segment_size) * 0.5
    }

    /// True if a tunnel cell with this short name is a transition connector
    pub fn is_transition_segment(&self, short_name: &str) -> bool {
        self.transition_segment_denylist
            .iter()
            .any(|name| name.eq_ignore_ascii_case(short_name))
    }
}

impl Default for MonumentIndexConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for MonumentIndexConfig {
    /// Tunnel sizes must be finite and non-negative and the marker suffix
    /// must not be empty
    fn validate(&self) -> Result<(), ConfigError> {
        if self
            .tunnel_segment_size
            .iter()
            .any(|c| !c.is_finite() || *c < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "tunnel_segment_size must be finite and non-negative, got {:?}",
                self.tunnel_segment_size
            )));
        }

        if self.monument_marker_suffix.is_empty() {
            return Err(ConfigError::Invalid(
                "monument_marker_suffix cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
