//! Adapters from raw world records to [`Feature`]s
//!
//! One constructor per source shape. Exclusion rules (transition cells,
//! `End` links) belong to the builder; these only translate geometry.

use crate::config::MonumentIndexConfig;
use crate::error::FeatureError;
use crate::geometry::BoundingVolume;
use crate::world::{DungeonBaseLink, DungeonGridCell, MonumentRecord};

use super::feature::{Feature, FeatureKind};

impl Feature {
    /// Monument with a single volume from its declared bounds
    pub fn from_monument(
        record: &MonumentRecord,
        alias: Option<String>,
        config: &MonumentIndexConfig,
    ) -> Result<Self, FeatureError> {
        let volume = BoundingVolume::from_local_bounds(&record.pose, &record.bounds)?;

        Self::new(
            record.prefab_path.as_str(),
            FeatureKind::NormalMonument,
            record.pose,
            vec![volume],
            alias,
            &config.prefab_extension,
        )
    }

    /// Tunnel segment with the fixed synthetic footprint centered on the cell
    pub fn from_tunnel_cell(
        cell: &DungeonGridCell,
        config: &MonumentIndexConfig,
    ) -> Result<Self, FeatureError> {
        let volume = BoundingVolume::new(
            cell.pose.position,
            cell.pose.rotation,
            config.tunnel_half_extents(),
        )?;

        Self::new(
            cell.prefab_path.as_str(),
            FeatureKind::TrainTunnelSegment,
            cell.pose,
            vec![volume],
            None,
            &config.prefab_extension,
        )
    }

    /// Facility module with one volume per enclosed room of the link
    ///
    /// Fails with [`FeatureError::NoGeometry`] when the link has no volumes.
    pub fn from_base_link(
        link: &DungeonBaseLink,
        config: &MonumentIndexConfig,
    ) -> Result<Self, FeatureError> {
        let volumes = link
            .volumes
            .iter()
            .map(|v| BoundingVolume::from_local_bounds(&v.pose, &v.bounds))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            link.prefab_path.as_str(),
            FeatureKind::FacilityLinkModule,
            link.pose,
            volumes,
            None,
            &config.prefab_extension,
        )
    }
}
