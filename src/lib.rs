//! Facade crate for the dark-sky spot search engine.
//!
//! This crate re-exports the core search types and, behind the `http`
//! feature, the raster loader and the Overpass and Nominatim clients.

#![forbid(unsafe_code)]

pub use darksky_core::{
    AccessibilityVerdict, BandedSearch, BortleClass, FeatureKind, FeatureLookup, LookupError,
    RadiusBand, RasterGrid, ReverseGeocoder, ScoredSpot, SearchConfig, SearchError, SkyQuality,
    SpotFinder, SpotQuery,
};

#[cfg(feature = "http")]
pub use darksky_data::{
    NominatimGeocoder, OverpassFeatureLookup, ProviderBuildError, RasterLoadError, load_raster,
};
