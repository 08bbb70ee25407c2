//! Immutable feature collections with nearest-feature queries
//!
//! All queries are a linear scan on squared distance to each feature's
//! closest bounds point. A world holds at most a few thousand landmarks, so
//! there is no partitioning structure.

use std::sync::Arc;

use crate::features::{Feature, FeatureKinds};
use crate::foundation::math::Point3;

use super::builder::BuildReport;

/// Feature nearest to `point`, or `None` for an empty slice.
///
/// Ties go to the earliest feature in the slice. Features at a non-finite
/// distance are never candidates, so a NaN or infinite query point also
/// gives `None`.
pub fn nearest<'a>(features: &'a [Arc<Feature>], point: &Point3) -> Option<&'a Arc<Feature>> {
    nearest_in(features.iter(), point)
}

fn nearest_in<'a, I>(features: I, point: &Point3) -> Option<&'a Arc<Feature>>
where
    I: IntoIterator<Item = &'a Arc<Feature>>,
{
    let mut best: Option<(&'a Arc<Feature>, f32)> = None;

    for feature in features {
        let distance = feature.distance_squared_to_bounds(point);
        if !distance.is_finite() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((feature, distance)),
        }
    }

    best.map(|(feature, _)| feature)
}

/// A built, read-only set of features
///
/// `all` holds facility modules, then tunnel segments, then monuments.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    all: Vec<Arc<Feature>>,
    monuments: Vec<Arc<Feature>>,
    tunnels: Vec<Arc<Feature>>,
    facility_modules: Vec<Arc<Feature>>,
    report: BuildReport,
}

impl SpatialIndex {
    /// An index with no features
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        monuments: Vec<Arc<Feature>>,
        tunnels: Vec<Arc<Feature>>,
        facility_modules: Vec<Arc<Feature>>,
        report: BuildReport,
    ) -> Self {
        let all = facility_modules
            .iter()
            .chain(&tunnels)
            .chain(&monuments)
            .cloned()
            .collect();

        Self {
            all,
            monuments,
            tunnels,
            facility_modules,
            report,
        }
    }

    /// Every feature, in tie-break order
    pub fn all(&self) -> &[Arc<Feature>] {
        &self.all
    }

    /// Normal monuments
    pub fn monuments(&self) -> &[Arc<Feature>] {
        &self.monuments
    }

    /// Train tunnel segments
    pub fn tunnels(&self) -> &[Arc<Feature>] {
        &self.tunnels
    }

    /// Underwater facility modules
    pub fn facility_modules(&self) -> &[Arc<Feature>] {
        &self.facility_modules
    }

    /// Counts recorded by the build that produced this index
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// True when nothing was indexed
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Nearest feature of any kind
    pub fn nearest_any(&self, point: &Point3) -> Option<&Arc<Feature>> {
        nearest(&self.all, point)
    }

    /// Nearest normal monument
    pub fn nearest_monument(&self, point: &Point3) -> Option<&Arc<Feature>> {
        nearest(&self.monuments, point)
    }

    /// Nearest tunnel segment
    pub fn nearest_tunnel(&self, point: &Point3) -> Option<&Arc<Feature>> {
        nearest(&self.tunnels, point)
    }

    /// Nearest facility module
    pub fn nearest_facility_module(&self, point: &Point3) -> Option<&Arc<Feature>> {
        nearest(&self.facility_modules, point)
    }

    /// Nearest feature whose kind is in `kinds`
    pub fn nearest_of_kinds(&self, kinds: FeatureKinds, point: &Point3) -> Option<&Arc<Feature>> {
        nearest_in(self.all.iter().filter(|f| kinds.includes(f.kind())), point)
    }

    /// Every feature whose bounds contain `point`
    pub fn containing(&self, point: &Point3) -> Vec<&Arc<Feature>> {
        self.all.iter().filter(|f| f.is_in_bounds(point)).collect()
    }

    /// First feature whose short name or display name matches, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<Feature>> {
        self.all.iter().find(|f| {
            f.short_name().eq_ignore_ascii_case(name) || f.display_name().eq_ignore_ascii_case(name)
        })
    }
}
