//! Player and plugin facing entry points
//!
//! [`where_am_i`] produces the chat-style location report, and
//! [`find_nearest`] hands other code a [`FeatureHandle`] it can query.

use std::fmt;
use std::sync::Arc;

use crate::features::{Feature, FeatureKind, FeatureKinds};
use crate::foundation::math::{Point3, Quat};
use crate::spatial::SpatialIndex;

/// Shared, read-only view of one indexed feature
///
/// Stays valid after the index that produced it is replaced.
#[derive(Debug, Clone)]
pub struct FeatureHandle {
    feature: Arc<Feature>,
}

impl FeatureHandle {
    /// Wrap a feature
    pub fn new(feature: Arc<Feature>) -> Self {
        Self { feature }
    }

    /// The underlying feature
    pub fn feature(&self) -> &Arc<Feature> {
        &self.feature
    }

    /// Canonical prefab path
    pub fn id(&self) -> &str {
        self.feature.id()
    }

    /// Short name
    pub fn short_name(&self) -> &str {
        self.feature.short_name()
    }

    /// Alias prefab path, monuments only
    pub fn alias(&self) -> Option<&str> {
        self.feature.alias()
    }

    /// Name to show to players
    pub fn display_name(&self) -> &str {
        self.feature.display_name()
    }

    /// Source category
    pub fn kind(&self) -> FeatureKind {
        self.feature.kind()
    }

    /// World position
    pub fn position(&self) -> Point3 {
        self.feature.position()
    }

    /// World rotation
    pub fn rotation(&self) -> Quat {
        self.feature.rotation()
    }

    /// True if `point` is inside the feature
    pub fn is_in_bounds(&self, point: &Point3) -> bool {
        self.feature.is_in_bounds(point)
    }

    /// World point in the feature's frame
    pub fn to_local(&self, world_point: &Point3) -> Point3 {
        self.feature.to_local(world_point)
    }

    /// Feature-frame point in world space
    pub fn to_world(&self, local_point: &Point3) -> Point3 {
        self.feature.to_world(local_point)
    }

    /// Closest point on the feature's bounds
    pub fn closest_point_on_bounds(&self, point: &Point3) -> Point3 {
        self.feature.closest_point_on_bounds(point)
    }

    /// Distance to the feature's bounds
    pub fn distance_to_bounds(&self, point: &Point3) -> f32 {
        self.feature.distance_to_bounds(point)
    }
}

/// Nearest feature among `kinds`, as a handle
pub fn find_nearest(index: &SpatialIndex, point: &Point3, kinds: FeatureKinds) -> Option<FeatureHandle> {
    index
        .nearest_of_kinds(kinds, point)
        .map(|feature| FeatureHandle::new(Arc::clone(feature)))
}

/// Where a point is relative to the indexed landmarks
#[derive(Debug, Clone)]
pub enum LocationReport {
    /// The point is inside the nearest feature
    Inside {
        /// Containing feature
        feature: Arc<Feature>,
        /// The point in the feature's frame
        local: Point3,
    },
    /// The point is outside every nearby feature
    Nearest {
        /// Nearest feature
        feature: Arc<Feature>,
        /// Distance to its bounds
        distance: f32,
    },
    /// The index is empty
    NoFeatures,
}

impl fmt::Display for LocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inside { feature, local } => write!(
                f,
                "You are inside {} ({}) at local position ({:.1}, {:.1}, {:.1})",
                feature.display_name(),
                feature.kind(),
                local.x,
                local.y,
                local.z
            ),
            Self::Nearest { feature, distance } => write!(
                f,
                "Nearest {} is {}, {:.1}m away",
                feature.kind(),
                feature.display_name(),
                distance
            ),
            Self::NoFeatures => write!(f, "No landmarks are indexed in this world"),
        }
    }
}

/// Describe where `point` is relative to the nearest feature of any kind
pub fn where_am_i(index: &SpatialIndex, point: &Point3) -> LocationReport {
    let Some(feature) = index.nearest_any(point) else {
        return LocationReport::NoFeatures;
    };

    if feature.is_in_bounds(point) {
        LocationReport::Inside {
            feature: Arc::clone(feature),
            local: feature.to_local(point),
        }
    } else {
        LocationReport::Nearest {
            feature: Arc::clone(feature),
            distance: feature.distance_to_bounds(point),
        }
    }
}
