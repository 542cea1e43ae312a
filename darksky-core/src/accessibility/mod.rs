//! Road and parking accessibility of candidate locations.
//!
//! The [`FeatureLookup`] trait abstracts an external index of roads, car
//! parks and parks. Implementations validate the remote payload into
//! [`RoadFeature`] values before anything else sees it; the engine then folds
//! the features into an [`AccessibilityVerdict`] per candidate.
//!
//! Lookup failures are reported as [`LookupError`] but never abort a search:
//! the augmenter degrades the affected candidate to "no access".

mod error;
mod lookup;
mod verdict;

pub use error::LookupError;
pub use lookup::{FeatureKind, FeatureLookup, RoadFeature};
pub use verdict::{AccessibilityVerdict, NearbyFeature};
