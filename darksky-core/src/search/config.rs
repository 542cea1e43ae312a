//! Tunable policy for [`crate::SpotFinder`].

use std::time::Duration;

use super::error::SearchError;

/// Default weight of the darkness term in the banded composite score.
pub const DEFAULT_DARKNESS_WEIGHT: f64 = 2.0;
/// Default weight of the accessibility term in the banded composite score.
pub const DEFAULT_ACCESSIBILITY_WEIGHT: f64 = 1.0;

/// Search configuration.
///
/// The banded composite score is
/// `(9 - class) * darkness_weight + accessibility * accessibility_weight`,
/// where `accessibility` is `0` without road access and otherwise
/// `accessibility_scale * (1 - d / lookup_radius_m)` clamped to
/// `0..=accessibility_scale`, `d` being the distance to the nearest feature.
/// The default scale of `8` matches the range of the darkness term, so the
/// default weights favour darkness two to one.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use darksky_core::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_weights(3.0, 1.0)
///     .with_lookup_timeout(Duration::from_secs(2));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.nearest_pool_size, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Weight of the darkness term.
    pub darkness_weight: f64,
    /// Weight of the accessibility term.
    pub accessibility_weight: f64,
    /// Maximum accessibility score.
    pub accessibility_scale: f64,
    /// Candidates pulled for augmentation in nearest-N search.
    pub nearest_pool_size: usize,
    /// Candidates pulled for augmentation per radius band.
    pub band_pool_size: usize,
    /// Search radius passed to the feature lookup, in metres.
    pub lookup_radius_m: f64,
    /// Deadline for each external call.
    ///
    /// Every candidate of a pool is looked up at once, so one augmentation
    /// round never takes much longer than this.
    pub lookup_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            darkness_weight: DEFAULT_DARKNESS_WEIGHT,
            accessibility_weight: DEFAULT_ACCESSIBILITY_WEIGHT,
            accessibility_scale: 8.0,
            nearest_pool_size: 10,
            band_pool_size: 5,
            lookup_radius_m: 3000.0,
            lookup_timeout: Duration::from_secs(5),
        }
    }
}

impl SearchConfig {
    /// Set both composite-score weights.
    #[must_use]
    pub const fn with_weights(mut self, darkness: f64, accessibility: f64) -> Self {
        self.darkness_weight = darkness;
        self.accessibility_weight = accessibility;
        self
    }

    /// Set the candidate pool sizes for nearest-N and banded search.
    #[must_use]
    pub const fn with_pool_sizes(mut self, nearest: usize, band: usize) -> Self {
        self.nearest_pool_size = nearest;
        self.band_pool_size = band;
        self
    }

    /// Set the lookup search radius in metres.
    #[must_use]
    pub const fn with_lookup_radius_m(mut self, radius_m: f64) -> Self {
        self.lookup_radius_m = radius_m;
        self
    }

    /// Set the per-call deadline.
    #[must_use]
    pub const fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SearchError> {
        let non_negative = |value: f64| value.is_finite() && value >= 0.0;
        let positive = |value: f64| value.is_finite() && value > 0.0;

        let checks: [(&'static str, bool, &'static str); 7] = [
            (
                "darkness_weight",
                non_negative(self.darkness_weight),
                "must be a finite, non-negative number",
            ),
            (
                "accessibility_weight",
                non_negative(self.accessibility_weight),
                "must be a finite, non-negative number",
            ),
            (
                "accessibility_scale",
                non_negative(self.accessibility_scale),
                "must be a finite, non-negative number",
            ),
            (
                "nearest_pool_size",
                self.nearest_pool_size > 0,
                "must be at least 1",
            ),
            ("band_pool_size", self.band_pool_size > 0, "must be at least 1"),
            (
                "lookup_radius_m",
                positive(self.lookup_radius_m),
                "must be a positive number of metres",
            ),
            (
                "lookup_timeout",
                !self.lookup_timeout.is_zero(),
                "must be longer than zero",
            ),
        ];

        checks
            .into_iter()
            .find(|(_, ok, _)| !ok)
            .map_or(Ok(()), |(field, _, reason)| {
                Err(SearchError::InvalidConfig { field, reason })
            })
    }
}
