//! Math utilities and types
//!
//! Provides the nalgebra aliases used for landmark geometry plus a rigid
//! `Pose` (position + rotation) with world/local frame transforms.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Rigid transform: a world position and an orientation, no scale.
///
/// Landmarks in the world are never scaled, so unlike a full render
/// transform this only needs translation and rotation, which keeps the
/// inverse exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in world space
    pub position: Point3,

    /// Orientation in world space
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Quat::identity(),
        }
    }
}

impl Pose {
    /// Create a pose from a position and rotation
    pub fn new(position: Point3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose with only position
    pub fn from_position(position: Point3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Transform a world-space point into this pose's local frame
    pub fn to_local(&self, world_point: &Point3) -> Point3 {
        Point3::from(self.rotation.inverse_transform_vector(&(world_point - self.position)))
    }

    /// Transform a local-frame point back into world space
    pub fn to_world(&self, local_point: &Point3) -> Point3 {
        self.position + self.rotation.transform_vector(&local_point.coords)
    }

    /// True when every component of position and rotation is finite
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
            && self.rotation.coords.iter().all(|c| c.is_finite())
    }
}

/// Math utility functions
pub mod utils {
    use super::{Point3, Quat};

    /// Build a rotation from angles about the X, Y and Z axes, in degrees.
    pub fn quat_from_euler_degrees(angles: [f32; 3]) -> Quat {
        Quat::from_euler_angles(
            angles[0].to_radians(),
            angles[1].to_radians(),
            angles[2].to_radians(),
        )
    }

    /// Build a point from an `[x, y, z]` array
    pub fn point_from_array(xyz: [f32; 3]) -> Point3 {
        Point3::new(xyz[0], xyz[1], xyz[2])
    }
}
