//! Landmark features
//!
//! Unifies monuments, tunnel segments and facility modules into one
//! [`Feature`] type tagged by [`FeatureKind`].

mod adapters;
mod feature;
mod naming;

pub use feature::{Feature, FeatureKind, FeatureKinds};
pub use naming::short_name;
