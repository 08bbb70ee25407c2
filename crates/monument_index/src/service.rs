//! Owner of the current spatial index
//!
//! The host keeps one [`MonumentService`] and calls [`MonumentService::load`]
//! whenever a world finishes loading. A new index is built completely
//! before it replaces the old one, and readers holding an earlier
//! [`Arc<SpatialIndex>`] keep seeing a consistent view.

use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, MonumentIndexConfig};
use crate::error::MonumentError;
use crate::features::Feature;
use crate::foundation::logging::info;
use crate::foundation::math::Point3;
use crate::spatial::{SpatialIndex, SpatialIndexBuilder};
use crate::world::{WorldSnapshot, WorldSource};

/// Owns the configuration and the currently published index
#[derive(Debug, Clone)]
pub struct MonumentService {
    config: MonumentIndexConfig,
    index: Option<Arc<SpatialIndex>>,
}

impl MonumentService {
    /// Create a service after validating `config`
    pub fn new(config: MonumentIndexConfig) -> Result<Self, MonumentError> {
        config.validate()?;
        Ok(Self {
            config,
            index: None,
        })
    }

    /// Create a service from a `.toml` or `.ron` config file
    pub fn from_config_file(path: &str) -> Result<Self, MonumentError> {
        let config = MonumentIndexConfig::load_from_file(path)?;
        Self::new(config)
    }

    /// Active configuration
    pub fn config(&self) -> &MonumentIndexConfig {
        &self.config
    }

    /// Build a fresh index from `source` and publish it
    ///
    /// Returns [`MonumentError::Disabled`] without touching the current
    /// index when the subsystem is switched off.
    pub fn load(&mut self, source: &dyn WorldSource) -> Result<Arc<SpatialIndex>, MonumentError> {
        if !self.config.enabled {
            return Err(MonumentError::Disabled);
        }

        let index = Arc::new(SpatialIndexBuilder::new(&self.config).build(source));
        self.index = Some(Arc::clone(&index));

        Ok(index)
    }

    /// Read a world snapshot file and [`load`](Self::load) it
    pub fn load_snapshot_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Arc<SpatialIndex>, MonumentError> {
        let path = path.as_ref();
        let snapshot = WorldSnapshot::load_from_file(path)?;
        info!(
            "Loaded world snapshot {} ({} objects)",
            path.display(),
            snapshot.object_count()
        );
        self.load(&snapshot)
    }

    /// Drop the published index, returning it
    pub fn unload(&mut self) -> Option<Arc<SpatialIndex>> {
        self.index.take()
    }

    /// Current index, if one is loaded
    pub fn snapshot(&self) -> Option<Arc<SpatialIndex>> {
        self.index.clone()
    }

    /// True once an index has been published
    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    /// Nearest feature of any kind in the current index
    pub fn nearest_any(&self, point: &Point3) -> Option<Arc<Feature>> {
        self.index.as_ref()?.nearest_any(point).cloned()
    }

    /// Nearest monument in the current index
    pub fn nearest_monument(&self, point: &Point3) -> Option<Arc<Feature>> {
        self.index.as_ref()?.nearest_monument(point).cloned()
    }
}
