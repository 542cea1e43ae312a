//! Feature lookup trait and the normalised feature shape it returns.

use async_trait::async_trait;
use geo::Coord;

use super::error::LookupError;

/// Category of an accessibility feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FeatureKind {
    /// A car park.
    Parking,
    /// A drivable road.
    Road,
    /// A public park with access.
    Park,
}

impl FeatureKind {
    /// Lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parking => "parking",
            Self::Road => "road",
            Self::Park => "park",
        }
    }
}

/// A feature reported by a [`FeatureLookup`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoadFeature {
    /// What the feature is.
    pub kind: FeatureKind,
    /// Name tag, when the source has one.
    pub name: Option<String>,
    /// Representative point (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
}

impl RoadFeature {
    /// Construct an unnamed feature.
    #[must_use]
    pub const fn new(kind: FeatureKind, location: Coord<f64>) -> Self {
        Self {
            kind,
            name: None,
            location,
        }
    }

    /// Attach a name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Query an external index of roads, car parks and parks.
///
/// Implementations must be `Send + Sync`: the augmenter issues one query per
/// candidate concurrently against a shared lookup. Any returned feature is
/// taken as evidence that the location is reachable; an empty list means no
/// access was found. Errors are logged by the caller and treated as "no
/// access", so implementations should not retry internally.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use darksky_core::{FeatureKind, FeatureLookup, LookupError, RoadFeature};
/// use geo::Coord;
///
/// struct EverywhereParking;
///
/// #[async_trait]
/// impl FeatureLookup for EverywhereParking {
///     async fn query(
///         &self,
///         location: Coord<f64>,
///         _search_radius_m: f64,
///     ) -> Result<Vec<RoadFeature>, LookupError> {
///         Ok(vec![RoadFeature::new(FeatureKind::Parking, location)])
///     }
/// }
/// ```
#[async_trait]
pub trait FeatureLookup: Send + Sync {
    /// Return features within `search_radius_m` metres of `location`.
    async fn query(
        &self,
        location: Coord<f64>,
        search_radius_m: f64,
    ) -> Result<Vec<RoadFeature>, LookupError>;
}
