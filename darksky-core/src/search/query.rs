use geo::Coord;

use super::error::{SearchError, validate_origin};

/// Parameters for a nearest-N search.
///
/// `minimum_accessible` is the number of road-accessible candidates the pool
/// must contain before results are restricted to accessible spots. With fewer,
/// the whole pool is used and remote spots are returned flagged as such. The
/// default of `1` falls back only when nothing had road access.
///
/// # Examples
///
/// ```
/// use darksky_core::SpotQuery;
/// use geo::Coord;
///
/// let query = SpotQuery::new(Coord { x: 11.582, y: 48.1351 }, 50.0, 3);
/// assert_eq!(query.minimum_accessible, 1);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpotQuery {
    /// Search origin (`x = longitude`, `y = latitude`).
    pub origin: Coord<f64>,
    /// Outer search radius in kilometres.
    pub max_distance_km: f64,
    /// Maximum number of spots to return.
    pub desired_results: usize,
    /// Accessible candidates required before filtering on access.
    pub minimum_accessible: usize,
}

impl SpotQuery {
    /// Construct a query with the default fallback threshold.
    #[must_use]
    pub const fn new(origin: Coord<f64>, max_distance_km: f64, desired_results: usize) -> Self {
        Self {
            origin,
            max_distance_km,
            desired_results,
            minimum_accessible: 1,
        }
    }

    /// Override the fallback threshold. Values below one are treated as one.
    #[must_use]
    pub const fn with_minimum_accessible(mut self, minimum: usize) -> Self {
        self.minimum_accessible = minimum;
        self
    }

    /// Reject structurally invalid input.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] for an invalid origin, a non-positive or
    /// non-finite radius, or a zero result count.
    pub fn validate(&self) -> Result<(), SearchError> {
        validate_origin(self.origin)?;
        if !self.max_distance_km.is_finite() || self.max_distance_km <= 0.0 {
            return Err(SearchError::InvalidRadius {
                field: "max_distance_km",
                value: self.max_distance_km,
            });
        }
        if self.desired_results == 0 {
            return Err(SearchError::ZeroResultCount);
        }
        Ok(())
    }
}
