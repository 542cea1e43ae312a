//! Dark-sky spot search and ranking.
//!
//! A [`RasterGrid`] of Bortle brightness classes is scanned for cells around
//! an origin. The darkest cells are checked for nearby roads, car parks and
//! parks through a [`FeatureLookup`], and the survivors are returned as
//! [`ScoredSpot`] values. [`SpotFinder`] ties the pieces together.
//!
//! External services sit behind the [`FeatureLookup`] and [`ReverseGeocoder`]
//! traits. Their failures never abort a search: an affected candidate is
//! treated as having no road access, and an unresolved origin stays unnamed.
//!
//! Coordinates are [`geo::Coord`] values with `x` holding longitude and `y`
//! holding latitude.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod accessibility;
pub mod augment;
pub mod candidate;
pub mod distance;
pub mod geocode;
pub mod rank;
pub mod raster;
pub mod scan;
pub mod search;
pub mod sky;

#[doc(hidden)]
pub mod test_support;

pub use accessibility::{
    AccessibilityVerdict, FeatureKind, FeatureLookup, LookupError, NearbyFeature, RoadFeature,
};
pub use augment::Augmenter;
pub use candidate::{AugmentedCandidate, Candidate};
pub use distance::{haversine_distance_km, haversine_distance_m};
pub use geocode::ReverseGeocoder;
pub use rank::{darkest_then_nearest, rank, rank_and_take};
pub use raster::{CellIndex, GridBounds, GridCell, NO_DATA, RasterError, RasterGrid};
pub use scan::scan;
pub use search::{
    BandSummary, BandedSearch, RadiusBand, ScoredSpot, SearchConfig, SearchError, SpotFinder,
    SpotQuery,
};
pub use sky::{BortleClass, MAX_SCORE, MIN_SCORE, SkyQuality, brightness_to_score, score_to_label};
