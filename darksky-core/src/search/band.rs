//! Radius bands for overview searches.

use super::error::SearchError;

/// A ring between two radii around the search origin, in kilometres.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiusBand {
    /// Inner radius, inclusive.
    pub min_km: f64,
    /// Outer radius, inclusive.
    pub max_km: f64,
    /// Label shown next to the band's result.
    pub label: String,
}

impl RadiusBand {
    /// Construct a band.
    #[must_use]
    pub fn new(min_km: f64, max_km: f64, label: impl Into<String>) -> Self {
        Self {
            min_km,
            max_km,
            label: label.into(),
        }
    }

    /// The three bands used by the overview search.
    ///
    /// # Examples
    ///
    /// ```
    /// use darksky_core::RadiusBand;
    ///
    /// let bands = RadiusBand::overview();
    /// assert_eq!(bands.len(), 3);
    /// assert_eq!(bands[0].max_km, bands[1].min_km);
    /// ```
    #[must_use]
    pub fn overview() -> Vec<Self> {
        vec![
            Self::new(0.0, 10.0, "Nearby"),
            Self::new(10.0, 50.0, "Day trip"),
            Self::new(50.0, 150.0, "Expedition"),
        ]
    }

    /// Check the radii.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRadius`] for a negative or non-finite
    /// inner radius or a non-positive outer radius, and
    /// [`SearchError::InvertedBand`] when the inner radius exceeds the outer.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.min_km.is_finite() || self.min_km < 0.0 {
            return Err(SearchError::InvalidRadius {
                field: "min_km",
                value: self.min_km,
            });
        }
        if !self.max_km.is_finite() || self.max_km <= 0.0 {
            return Err(SearchError::InvalidRadius {
                field: "max_km",
                value: self.max_km,
            });
        }
        if self.min_km > self.max_km {
            return Err(SearchError::InvertedBand {
                label: self.label.clone(),
                min_km: self.min_km,
                max_km: self.max_km,
            });
        }
        Ok(())
    }

    /// Whether `distance_km` falls inside the band.
    #[must_use]
    pub fn contains(&self, distance_km: f64) -> bool {
        (self.min_km..=self.max_km).contains(&distance_km)
    }

    /// Whether `self` takes precedence over `other` for shared distances.
    ///
    /// The band with the smaller inner radius wins; equal inner radii fall
    /// back to list position.
    fn is_inner_to(&self, position: usize, other: &Self, other_position: usize) -> bool {
        self.min_km
            .total_cmp(&other.min_km)
            .then(position.cmp(&other_position))
            .is_lt()
    }
}

/// Whether a band inner to `bands[position]` already covers `distance_km`.
///
/// Every distance belongs to at most one band of `bands`, so overlapping bands
/// and the shared edges of adjacent bands never offer the same cell twice.
pub(crate) fn claimed_by_inner_band(
    bands: &[RadiusBand],
    position: usize,
    distance_km: f64,
) -> bool {
    bands.get(position).is_some_and(|band| {
        bands.iter().enumerate().any(|(other_position, other)| {
            other.is_inner_to(other_position, band, position) && other.contains(distance_km)
        })
    })
}
