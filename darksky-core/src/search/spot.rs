//! User-facing search results.

use crate::accessibility::NearbyFeature;
use crate::candidate::AugmentedCandidate;
use crate::sky::SkyQuality;

use super::band::RadiusBand;

/// The band a banded-search result belongs to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BandSummary {
    /// Band label.
    pub label: String,
    /// Inner radius in kilometres.
    pub min_km: f64,
    /// Outer radius in kilometres.
    pub max_km: f64,
}

impl From<&RadiusBand> for BandSummary {
    fn from(band: &RadiusBand) -> Self {
        Self {
            label: band.label.clone(),
            min_km: band.min_km,
            max_km: band.max_km,
        }
    }
}

/// A ranked dark-sky spot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoredSpot {
    /// Latitude of the cell centre.
    pub lat: f64,
    /// Longitude of the cell centre.
    pub lng: f64,
    /// Bortle class of the cell.
    pub brightness_class: u8,
    /// Darkness score in `1..=10`.
    pub score: u8,
    /// Band of `score`.
    pub label: SkyQuality,
    /// Distance from the origin, rounded to whole kilometres.
    pub distance_km: u32,
    /// Whether a road, car park or park was found nearby.
    pub has_road_access: bool,
    /// The closest accessibility feature.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub nearest_feature: Option<NearbyFeature>,
    /// Band this spot represents, for banded searches.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub band: Option<BandSummary>,
    /// Composite score that selected this spot, for banded searches.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub combined_score: Option<f64>,
}

impl ScoredSpot {
    /// Build a spot from an augmented candidate.
    #[must_use]
    pub fn from_augmented(augmented: &AugmentedCandidate) -> Self {
        let candidate = &augmented.candidate;
        let score = candidate.brightness.score();
        Self {
            lat: candidate.location.y,
            lng: candidate.location.x,
            brightness_class: candidate.brightness.get(),
            score,
            label: SkyQuality::from_score(score),
            distance_km: whole_km(candidate.distance_km),
            has_road_access: augmented.verdict.has_road_access,
            nearest_feature: augmented.verdict.nearest_feature.clone(),
            band: None,
            combined_score: None,
        }
    }

    /// Tag the spot with the band it was selected for.
    #[must_use]
    pub fn in_band(mut self, band: &RadiusBand, combined_score: f64) -> Self {
        self.band = Some(BandSummary::from(band));
        self.combined_score = Some(combined_score);
        self
    }
}

/// Round a distance to whole kilometres.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "distances are non-negative and bounded by the search radius; the cast saturates"
)]
const fn whole_km(distance_km: f64) -> u32 {
    distance_km.round() as u32
}

/// Result of a banded search.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BandedSearch {
    /// Display name of the origin, when the geocoder knew one.
    pub origin_name: Option<String>,
    /// Best spot per non-empty band, in input band order.
    pub spots: Vec<ScoredSpot>,
}
