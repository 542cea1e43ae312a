//! Overpass JSON payloads and their conversion to [`RoadFeature`]s.

use std::collections::HashMap;

use darksky_core::{FeatureKind, RoadFeature};
use geo::Coord;
use serde::Deserialize;

use super::query::DRIVABLE_HIGHWAYS;

/// Top-level Overpass response.
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    pub(crate) elements: Vec<OverpassElement>,
}

/// A node or way returned by `out center tags`.
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    fn location(&self) -> Option<Coord<f64>> {
        let (lat, lon) = match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Coord { x: lon, y: lat })
    }

    fn kind(&self) -> Option<FeatureKind> {
        let tag = |key: &str| self.tags.get(key).map(String::as_str);
        if tag("amenity") == Some("parking") {
            Some(FeatureKind::Parking)
        } else if tag("highway").is_some_and(|value| DRIVABLE_HIGHWAYS.contains(&value)) {
            Some(FeatureKind::Road)
        } else if tag("leisure") == Some("park") {
            Some(FeatureKind::Park)
        } else {
            None
        }
    }

    /// Convert to a feature, dropping elements without a usable point or kind.
    pub(crate) fn into_feature(self) -> Option<RoadFeature> {
        let feature = RoadFeature::new(self.kind()?, self.location()?);
        Some(match self.tags.get("name").map(|name| name.trim()) {
            Some(name) if !name.is_empty() => feature.with_name(name),
            _ => feature,
        })
    }
}

impl OverpassResponse {
    /// Validated features, in response order.
    pub(crate) fn into_features(self) -> Vec<RoadFeature> {
        self.elements
            .into_iter()
            .filter_map(OverpassElement::into_feature)
            .collect()
    }
}
