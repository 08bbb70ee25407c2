//! The unified landmark record
//!
//! Every indexed landmark, whatever its source shape, ends up as one
//! [`Feature`]: identity, a principal pose, and one or more oriented boxes.
//! The [`FeatureKind`] tag remembers where it came from.

use std::fmt;

use crate::error::FeatureError;
use crate::foundation::math::{Point3, Pose, Quat};
use crate::geometry::BoundingVolume;

use super::naming::short_name;

/// Source category of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Static monument with declared bounds
    NormalMonument,
    /// Train tunnel grid cell with a synthetic footprint
    TrainTunnelSegment,
    /// Underwater facility link with one box per enclosed room
    FacilityLinkModule,
}

impl FeatureKind {
    /// The mask bit for this kind
    pub fn as_flag(self) -> FeatureKinds {
        match self {
            Self::NormalMonument => FeatureKinds::MONUMENTS,
            Self::TrainTunnelSegment => FeatureKinds::TUNNELS,
            Self::FacilityLinkModule => FeatureKinds::FACILITY_MODULES,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NormalMonument => write!(f, "monument"),
            Self::TrainTunnelSegment => write!(f, "tunnel segment"),
            Self::FacilityLinkModule => write!(f, "facility module"),
        }
    }
}

bitflags::bitflags! {
    /// Set of feature kinds, used to filter queries
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FeatureKinds: u8 {
        /// Static monuments
        const MONUMENTS = 1 << 0;
        /// Train tunnel segments
        const TUNNELS = 1 << 1;
        /// Underwater facility modules
        const FACILITY_MODULES = 1 << 2;
    }
}

impl FeatureKinds {
    /// True if `kind` is in the set
    pub fn includes(self, kind: FeatureKind) -> bool {
        self.contains(kind.as_flag())
    }
}

/// A queryable landmark
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: String,
    short_name: String,
    alias: Option<String>,
    display_name: String,
    kind: FeatureKind,
    pose: Pose,
    volumes: Vec<BoundingVolume>,
}

impl Feature {
    /// Build a feature, enforcing non-empty geometry and a finite pose.
    ///
    /// `prefab_extension` is stripped when deriving the short name and the
    /// display name.
    pub fn new(
        id: impl Into<String>,
        kind: FeatureKind,
        pose: Pose,
        volumes: Vec<BoundingVolume>,
        alias: Option<String>,
        prefab_extension: &str,
    ) -> Result<Self, FeatureError> {
        let id = id.into();

        if volumes.is_empty() {
            return Err(FeatureError::NoGeometry(id));
        }
        if !pose.is_finite() {
            return Err(FeatureError::NonFinitePose(id));
        }

        let short = short_name(&id, prefab_extension);
        let display_name = alias
            .as_deref()
            .map_or_else(|| short.clone(), |a| short_name(a, prefab_extension));

        Ok(Self {
            id,
            short_name: short,
            alias,
            display_name,
            kind,
            pose,
            volumes,
        })
    }

    /// Canonical source identifier (prefab path)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Last path segment of the id without extension
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Friendly name resolved at build time, monuments only
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Short form of the alias if there is one, otherwise the short name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Source category
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Principal pose
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// World position of the principal frame
    pub fn position(&self) -> Point3 {
        self.pose.position
    }

    /// World rotation of the principal frame
    pub fn rotation(&self) -> Quat {
        self.pose.rotation
    }

    /// Owned bounding volumes, never empty
    pub fn volumes(&self) -> &[BoundingVolume] {
        &self.volumes
    }

    /// True if any owned volume contains `point`
    pub fn is_in_bounds(&self, point: &Point3) -> bool {
        self.volumes.iter().any(|v| v.contains(point))
    }

    /// Closest point on the nearest owned volume
    ///
    /// With several volumes the one at minimum distance wins; the earlier
    /// volume wins exact ties.
    pub fn closest_point_on_bounds(&self, point: &Point3) -> Point3 {
        let mut best = self.volumes[0].closest_surface_point(point);
        let mut best_distance = (best - point).magnitude_squared();

        for volume in &self.volumes[1..] {
            let candidate = volume.closest_surface_point(point);
            let distance = (candidate - point).magnitude_squared();
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }

        best
    }

    /// Squared distance from `point` to the feature's bounds
    pub fn distance_squared_to_bounds(&self, point: &Point3) -> f32 {
        (self.closest_point_on_bounds(point) - point).magnitude_squared()
    }

    /// Distance from `point` to the feature's bounds (0 inside)
    pub fn distance_to_bounds(&self, point: &Point3) -> f32 {
        self.distance_squared_to_bounds(point).sqrt()
    }

    /// World point expressed in the feature's principal frame
    pub fn to_local(&self, world_point: &Point3) -> Point3 {
        self.pose.to_local(world_point)
    }

    /// Principal-frame point expressed in world space
    pub fn to_world(&self, local_point: &Point3) -> Point3 {
        self.pose.to_world(local_point)
    }
}
