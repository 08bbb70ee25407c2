//! File-backed world source
//!
//! A captured copy of a world's landmark data, stored as RON or TOML.
//! Positions are `[x, y, z]` and rotations are angles about the X, Y and Z
//! axes in degrees, which keeps hand-written fixtures readable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    BaseLinkType, ChildObject, DungeonBaseLink, DungeonGridCell, LinkVolume, MonumentRecord,
    PrefabGroup, SpawnedInstance, WorldObjectId, WorldSource,
};
use crate::error::WorldSourceError;
use crate::foundation::math::utils::{point_from_array, quat_from_euler_degrees};
use crate::foundation::math::{Pose, Vec3};
use crate::geometry::LocalBounds;

/// Position and rotation as plain arrays
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseEntry {
    /// World position
    pub position: [f32; 3],
    /// Rotation in degrees about X, Y, Z
    pub rotation: [f32; 3],
}

impl PoseEntry {
    fn to_pose(self) -> Pose {
        Pose::new(
            point_from_array(self.position),
            quat_from_euler_degrees(self.rotation),
        )
    }
}

/// Bounds as plain arrays
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsEntry {
    /// Local center offset
    pub center: [f32; 3],
    /// Full size
    pub size: [f32; 3],
}

impl BoundsEntry {
    fn to_bounds(self) -> LocalBounds {
        LocalBounds::new(Vec3::from(self.center), Vec3::from(self.size))
    }
}

/// Serialized monument
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonumentEntry {
    pub id: u64,
    pub prefab: String,
    #[serde(default)]
    pub pose: PoseEntry,
    pub bounds: BoundsEntry,
}

/// Serialized tunnel cell
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunnelCellEntry {
    pub prefab: String,
    #[serde(default)]
    pub pose: PoseEntry,
}

/// Serialized facility link volume
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkVolumeEntry {
    #[serde(default)]
    pub pose: PoseEntry,
    pub bounds: BoundsEntry,
}

/// Serialized facility link
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLinkEntry {
    pub prefab: String,
    #[serde(default)]
    pub pose: PoseEntry,
    pub link_type: BaseLinkType,
    #[serde(default)]
    pub volumes: Vec<LinkVolumeEntry>,
}

/// Serialized child of a spawned instance
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildEntry {
    pub name: String,
    #[serde(default)]
    pub marker: bool,
    #[serde(default)]
    pub owner: Option<u64>,
}

/// Serialized prefab group; each inner `Vec` is one instance's children
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabGroupEntry {
    pub prefab: String,
    #[serde(default)]
    pub instances: Vec<Vec<ChildEntry>>,
}

/// A complete world capture that can stand in for a live world
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSnapshot {
    /// Declared monuments
    pub monuments: Vec<MonumentEntry>,
    /// Train tunnel cells
    pub tunnel_cells: Vec<TunnelCellEntry>,
    /// Underwater facility links
    pub base_links: Vec<BaseLinkEntry>,
    /// Prefab instances for alias discovery
    pub prefab_groups: Vec<PrefabGroupEntry>,
}

impl WorldSnapshot {
    /// Load a snapshot, picking the format from the file extension
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, WorldSourceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::from_ron_str(&contents),
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| WorldSourceError::Parse(e.to_string()))
            }
            _ => Err(WorldSourceError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a RON snapshot
    pub fn from_ron_str(contents: &str) -> Result<Self, WorldSourceError> {
        ron::from_str(contents).map_err(|e| WorldSourceError::Parse(e.to_string()))
    }

    /// Total number of raw landmark objects in the snapshot
    pub fn object_count(&self) -> usize {
        self.monuments.len() + self.tunnel_cells.len() + self.base_links.len()
    }
}

impl WorldSource for WorldSnapshot {
    fn monuments(&self) -> Vec<MonumentRecord> {
        self.monuments
            .iter()
            .map(|m| MonumentRecord {
                id: WorldObjectId(m.id),
                prefab_path: m.prefab.clone(),
                pose: m.pose.to_pose(),
                bounds: m.bounds.to_bounds(),
            })
            .collect()
    }

    fn dungeon_grid_cells(&self) -> Vec<DungeonGridCell> {
        self.tunnel_cells
            .iter()
            .map(|c| DungeonGridCell {
                prefab_path: c.prefab.clone(),
                pose: c.pose.to_pose(),
            })
            .collect()
    }

    fn dungeon_base_links(&self) -> Result<Vec<DungeonBaseLink>, WorldSourceError> {
        Ok(self
            .base_links
            .iter()
            .map(|link| DungeonBaseLink {
                prefab_path: link.prefab.clone(),
                pose: link.pose.to_pose(),
                link_type: link.link_type,
                volumes: link
                    .volumes
                    .iter()
                    .map(|v| LinkVolume {
                        pose: v.pose.to_pose(),
                        bounds: v.bounds.to_bounds(),
                    })
                    .collect(),
            })
            .collect())
    }

    fn prefab_groups(&self) -> Vec<PrefabGroup> {
        self.prefab_groups
            .iter()
            .map(|group| PrefabGroup {
                prefab_path: group.prefab.clone(),
                instances: group
                    .instances
                    .iter()
                    .map(|children| SpawnedInstance {
                        children: children
                            .iter()
                            .map(|child| ChildObject {
                                name: child.name.clone(),
                                has_marker_component: child.marker,
                                owning_monument: child.owner.map(WorldObjectId),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}
