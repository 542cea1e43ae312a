//! Resolve a coordinate into a display name.
//!
//! Banded searches label their origin once per request. A failed or empty
//! resolution leaves the origin unnamed; it never fails the search.

use async_trait::async_trait;
use geo::Coord;

use crate::accessibility::LookupError;

/// Reverse geocoding collaborator.
///
/// Implementations normalise blank names to `Ok(None)`.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Return a display name for `location`, if one is known.
    async fn resolve(&self, location: Coord<f64>) -> Result<Option<String>, LookupError>;
}
