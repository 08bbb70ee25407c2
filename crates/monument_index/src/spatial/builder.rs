//! Spatial index construction
//!
//! Turns everything a [`WorldSource`] exposes into features, in a fixed
//! order: facility modules, then tunnel segments, then monuments. That order
//! is also the order of [`SpatialIndex::all`] and therefore decides which
//! feature wins a distance tie.
//!
//! Bad objects never abort a build. They are logged, counted in the
//! [`BuildReport`] and left out.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::MonumentIndexConfig;
use crate::features::{short_name, Feature};
use crate::foundation::logging::{debug, info, warn};
use crate::world::{BaseLinkType, PrefabGroup, WorldObjectId, WorldSource};

use super::index::SpatialIndex;

/// Counts gathered while building an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Indexed monuments
    pub monuments: usize,
    /// Indexed tunnel segments
    pub tunnels: usize,
    /// Indexed facility modules
    pub facility_modules: usize,
    /// Objects left out by rule (transition cells, `End` links, links
    /// without rooms)
    pub excluded: usize,
    /// Objects that failed to convert
    pub skipped: usize,
    /// Monument aliases discovered from marker objects
    pub aliases: usize,
}

impl BuildReport {
    /// Total number of indexed features
    pub fn total(&self) -> usize {
        self.monuments + self.tunnels + self.facility_modules
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} features ({} monuments, {} tunnel segments, {} facility modules), {} excluded, {} skipped, {} aliases",
            self.total(),
            self.monuments,
            self.tunnels,
            self.facility_modules,
            self.excluded,
            self.skipped,
            self.aliases
        )
    }
}

/// Collect `monument id -> enclosing prefab path` from marker children.
///
/// A child counts as a marker when its name ends with `marker_suffix`, it
/// carries the marker component and it names the monument it belongs to.
/// When a monument has several markers the first one seen wins.
pub fn discover_aliases(
    groups: &[PrefabGroup],
    marker_suffix: &str,
) -> HashMap<WorldObjectId, String> {
    let mut aliases = HashMap::new();

    for group in groups {
        for instance in &group.instances {
            for child in &instance.children {
                if !child.has_marker_component || !child.name.ends_with(marker_suffix) {
                    continue;
                }

                if let Some(owner) = child.owning_monument {
                    aliases
                        .entry(owner)
                        .or_insert_with(|| group.prefab_path.clone());
                }
            }
        }
    }

    aliases
}

/// Builds a [`SpatialIndex`] from a world source
pub struct SpatialIndexBuilder<'a> {
    config: &'a MonumentIndexConfig,
}

impl<'a> SpatialIndexBuilder<'a> {
    /// Create a builder using `config` for names, exclusions and footprints
    pub fn new(config: &'a MonumentIndexConfig) -> Self {
        Self { config }
    }

    /// Read the whole source and return a finished index
    pub fn build(&self, source: &dyn WorldSource) -> SpatialIndex {
        let aliases = discover_aliases(&source.prefab_groups(), &self.config.monument_marker_suffix);
        debug!("Discovered {} monument aliases", aliases.len());

        let mut report = BuildReport {
            aliases: aliases.len(),
            ..BuildReport::default()
        };

        let facility_modules = self.build_facility_modules(source, &mut report);
        let tunnels = self.build_tunnels(source, &mut report);
        let monuments = self.build_monuments(source, &aliases, &mut report);

        report.facility_modules = facility_modules.len();
        report.tunnels = tunnels.len();
        report.monuments = monuments.len();

        info!("Monument index built: {}", report);

        SpatialIndex::from_parts(monuments, tunnels, facility_modules, report)
    }

    fn build_facility_modules(
        &self,
        source: &dyn WorldSource,
        report: &mut BuildReport,
    ) -> Vec<Arc<Feature>> {
        let links = match source.dungeon_base_links() {
            Ok(links) => links,
            Err(e) => {
                warn!("Facility modules unavailable, indexing none: {}", e);
                return Vec::new();
            }
        };

        let mut features = Vec::with_capacity(links.len());
        for link in &links {
            if link.link_type == BaseLinkType::End {
                debug!("Excluding end link {}", link.prefab_path);
                report.excluded += 1;
                continue;
            }
            if link.volumes.is_empty() {
                debug!("Excluding link {} with no enclosed rooms", link.prefab_path);
                report.excluded += 1;
                continue;
            }

            match Feature::from_base_link(link, self.config) {
                Ok(feature) => features.push(Arc::new(feature)),
                Err(e) => {
                    warn!("Skipping facility link {}: {}", link.prefab_path, e);
                    report.skipped += 1;
                }
            }
        }

        features
    }

    fn build_tunnels(&self, source: &dyn WorldSource, report: &mut BuildReport) -> Vec<Arc<Feature>> {
        let cells = source.dungeon_grid_cells();

        let mut features = Vec::with_capacity(cells.len());
        for cell in &cells {
            let name = short_name(&cell.prefab_path, &self.config.prefab_extension);
            if self.config.is_transition_segment(&name) {
                debug!("Excluding transition cell {}", cell.prefab_path);
                report.excluded += 1;
                continue;
            }

            match Feature::from_tunnel_cell(cell, self.config) {
                Ok(feature) => features.push(Arc::new(feature)),
                Err(e) => {
                    warn!("Skipping tunnel cell {}: {}", cell.prefab_path, e);
                    report.skipped += 1;
                }
            }
        }

        features
    }

    fn build_monuments(
        &self,
        source: &dyn WorldSource,
        aliases: &HashMap<WorldObjectId, String>,
        report: &mut BuildReport,
    ) -> Vec<Arc<Feature>> {
        let records = source.monuments();

        let mut features = Vec::with_capacity(records.len());
        for record in &records {
            let alias = aliases.get(&record.id).cloned();

            match Feature::from_monument(record, alias, self.config) {
                Ok(feature) => features.push(Arc::new(feature)),
                Err(e) => {
                    warn!("Skipping monument {}: {}", record.prefab_path, e);
                    report.skipped += 1;
                }
            }
        }

        features
    }
}
