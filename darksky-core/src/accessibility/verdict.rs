//! Fold lookup results into a per-candidate verdict.

use geo::Coord;

use super::lookup::{FeatureKind, RoadFeature};
use crate::distance::haversine_distance_m;

/// The closest feature to a candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NearbyFeature {
    /// What the feature is.
    pub kind: FeatureKind,
    /// Name tag, when known.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Great-circle distance from the candidate.
    pub distance_m: f64,
}

/// Accessibility of one candidate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccessibilityVerdict {
    /// Whether any road, car park or park was found nearby.
    pub has_road_access: bool,
    /// The closest such feature.
    pub nearest_feature: Option<NearbyFeature>,
}

impl AccessibilityVerdict {
    /// Verdict used when nothing was found or the lookup failed.
    #[must_use]
    pub const fn no_access() -> Self {
        Self {
            has_road_access: false,
            nearest_feature: None,
        }
    }

    /// Build a verdict from the features returned around `location`.
    ///
    /// The nearest feature wins; on equal distances the first one returned is
    /// kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use darksky_core::{AccessibilityVerdict, FeatureKind, RoadFeature};
    /// use geo::Coord;
    ///
    /// let here = Coord { x: 11.0, y: 48.0 };
    /// let features = vec![
    ///     RoadFeature::new(FeatureKind::Road, Coord { x: 11.01, y: 48.0 }),
    ///     RoadFeature::new(FeatureKind::Parking, Coord { x: 11.001, y: 48.0 }).with_name("P1"),
    /// ];
    /// let verdict = AccessibilityVerdict::from_features(here, &features);
    /// assert!(verdict.has_road_access);
    /// let nearest = verdict.nearest_feature.expect("nearest");
    /// assert_eq!(nearest.kind, FeatureKind::Parking);
    /// assert_eq!(nearest.name.as_deref(), Some("P1"));
    /// ```
    #[must_use]
    pub fn from_features(location: Coord<f64>, features: &[RoadFeature]) -> Self {
        let nearest = features
            .iter()
            .map(|feature| (feature, haversine_distance_m(location, feature.location)))
            .fold(None, |best: Option<(&RoadFeature, f64)>, (feature, distance)| {
                match best {
                    Some((_, best_distance)) if best_distance <= distance => best,
                    _ => Some((feature, distance)),
                }
            });

        nearest.map_or_else(Self::no_access, |(feature, distance_m)| Self {
            has_road_access: true,
            nearest_feature: Some(NearbyFeature {
                kind: feature.kind,
                name: feature.name.clone(),
                distance_m,
            }),
        })
    }
}
