//! Oriented bounding box primitive
//!
//! The only geometry the index needs: a point-containment test and the
//! closest point on (or inside) the box. Both work by moving the query
//! point into the box's local frame, where the box is axis-aligned.

use crate::error::FeatureError;
use crate::foundation::math::{Point3, Pose, Quat, Vec3};

/// Engine-style bounds declared in an owner's local frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalBounds {
    /// Center offset from the owner's origin, in the owner's frame
    pub center: Vec3,
    /// Full size along each local axis
    pub size: Vec3,
}

impl LocalBounds {
    /// Create bounds from a local center offset and full size
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    /// Half of `size`
    pub fn extents(&self) -> Vec3 {
        self.size * 0.5
    }
}

/// An oriented box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    center: Point3,
    rotation: Quat,
    half_extents: Vec3,
}

impl BoundingVolume {
    /// Creates a new oriented box
    ///
    /// Fails when any half-extent is negative or not finite.
    pub fn new(center: Point3, rotation: Quat, half_extents: Vec3) -> Result<Self, FeatureError> {
        if half_extents.iter().any(|e| !e.is_finite() || *e < 0.0) {
            return Err(FeatureError::InvalidExtents {
                x: half_extents.x,
                y: half_extents.y,
                z: half_extents.z,
            });
        }

        Ok(Self {
            center,
            rotation,
            half_extents,
        })
    }

    /// Creates a box from bounds declared in the local frame of `pose`
    pub fn from_local_bounds(pose: &Pose, bounds: &LocalBounds) -> Result<Self, FeatureError> {
        let center = pose.position + pose.rotation.transform_vector(&bounds.center);
        Self::new(center, pose.rotation, bounds.extents())
    }

    /// World-space center
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// World-space orientation
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Half size along each local axis
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    fn to_local(&self, point: &Point3) -> Vec3 {
        self.rotation.inverse_transform_vector(&(point - self.center))
    }

    /// Check if a world-space point lies inside or on the box
    pub fn contains(&self, point: &Point3) -> bool {
        let local = self.to_local(point);
        (0..3).all(|i| local[i].abs() <= self.half_extents[i])
    }

    /// Closest point on or inside the box to `point`
    ///
    /// Interior points come back unchanged (up to float round-off), so the
    /// result is only on the surface when `point` is outside.
    pub fn closest_surface_point(&self, point: &Point3) -> Point3 {
        let local = self.to_local(point);
        let clamped = Vec3::new(
            local.x.clamp(-self.half_extents.x, self.half_extents.x),
            local.y.clamp(-self.half_extents.y, self.half_extents.y),
            local.z.clamp(-self.half_extents.z, self.half_extents.z),
        );
        self.center + self.rotation.transform_vector(&clamped)
    }

    /// Squared distance from `point` to the box (0 inside)
    pub fn distance_squared_to(&self, point: &Point3) -> f32 {
        (self.closest_surface_point(point) - point).magnitude_squared()
    }
}
