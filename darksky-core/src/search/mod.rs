//! Composite search over the raster and its collaborators.
//!
//! Two operations are offered by [`SpotFinder`]. A nearest-N search returns
//! the darkest accessible spots within a radius. A banded search returns the
//! best compromise between darkness and accessibility in each of several
//! radius bands. Both validate their input up front; after that, sparse
//! coverage and failed lookups only shrink or degrade the result.

mod band;
mod banded;
mod config;
mod error;
mod finder;
mod nearest;
mod query;
mod spot;

pub use band::RadiusBand;
pub use banded::{accessibility_score, combined_score, select_best};
pub use config::{DEFAULT_ACCESSIBILITY_WEIGHT, DEFAULT_DARKNESS_WEIGHT, SearchConfig};
pub use error::SearchError;
pub use finder::SpotFinder;
pub use nearest::select_nearest;
pub use query::SpotQuery;
pub use spot::{BandSummary, BandedSearch, ScoredSpot};
