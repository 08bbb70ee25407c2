//! Raw landmark data as supplied by the host world
//!
//! These are the shapes the terrain/world collaborator hands over before
//! any normalisation. The index builder only reads them through
//! [`WorldSource`], so a host plugs in by implementing that trait.

pub mod snapshot;

use serde::{Deserialize, Serialize};

use crate::error::WorldSourceError;
use crate::foundation::math::Pose;
use crate::geometry::LocalBounds;

pub use snapshot::WorldSnapshot;

/// Identity of a spawned object in the host world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldObjectId(pub u64);

/// A declared monument with its bounds in the monument's local frame
#[derive(Debug, Clone, PartialEq)]
pub struct MonumentRecord {
    /// Object identity, used to resolve aliases
    pub id: WorldObjectId,
    /// Full prefab path
    pub prefab_path: String,
    /// World pose of the monument root
    pub pose: Pose,
    /// Declared bounds relative to `pose`
    pub bounds: LocalBounds,
}

/// One placed cell of the train tunnel grid
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonGridCell {
    /// Full prefab path of the cell
    pub prefab_path: String,
    /// World pose of the cell
    pub pose: Pose,
}

/// Role of a facility link in the modular base layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseLinkType {
    /// Entrance module
    Start,
    /// Regular module with enclosed rooms
    Segment,
    /// Cap/connector piece with no enclosed space
    End,
}

/// One enclosed sub-volume of a facility link
#[derive(Debug, Clone, PartialEq)]
pub struct LinkVolume {
    /// World pose of the volume's transform
    pub pose: Pose,
    /// Bounds relative to `pose`
    pub bounds: LocalBounds,
}

/// One link (module) of an underwater facility
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonBaseLink {
    /// Full prefab path of the link
    pub prefab_path: String,
    /// World pose of the link root
    pub pose: Pose,
    /// Link role
    pub link_type: BaseLinkType,
    /// Child volumes discovered under the link
    pub volumes: Vec<LinkVolume>,
}

/// A child object of a spawned prefab instance
#[derive(Debug, Clone, PartialEq)]
pub struct ChildObject {
    /// Object name (usually a prefab path)
    pub name: String,
    /// Whether the object carries the monument marker component
    pub has_marker_component: bool,
    /// Monument the marker belongs to, when it has one
    pub owning_monument: Option<WorldObjectId>,
}

/// One spawned instance of a prefab
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpawnedInstance {
    /// Direct and nested children of the instance
    pub children: Vec<ChildObject>,
}

/// All spawned instances of one source prefab
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabGroup {
    /// Full prefab path shared by the instances
    pub prefab_path: String,
    /// Spawned instances
    pub instances: Vec<SpawnedInstance>,
}

/// Read-only access to the landmark data of a loaded world.
///
/// Every method is pull-based and may be called once per index build.
/// An absent category is an empty `Vec`, not an error.
pub trait WorldSource {
    /// All declared monuments
    fn monuments(&self) -> Vec<MonumentRecord>;

    /// All train tunnel grid cells
    fn dungeon_grid_cells(&self) -> Vec<DungeonGridCell>;

    /// All underwater facility links
    ///
    /// Hosts that can only reach this list through engine internals return
    /// [`WorldSourceError::Unavailable`] when that access fails.
    fn dungeon_base_links(&self) -> Result<Vec<DungeonBaseLink>, WorldSourceError>;

    /// Spawned instances grouped by source prefab, used for alias discovery
    fn prefab_groups(&self) -> Vec<PrefabGroup>;
}
