//! Data sources for the dark-sky engine.
//!
//! Responsibilities:
//! - Load the brightness raster from disk.
//! - Implement the core collaborator traits against public web services:
//!   Overpass for roads, car parks and parks, Nominatim for reverse
//!   geocoding.
//!
//! Boundaries:
//! - No ranking or scoring rules (those live in `darksky-core`).
//! - Remote payloads are validated into core types at this edge; malformed
//!   elements are dropped here rather than passed on.
//! - Adapters never retry. A failed call surfaces as a
//!   [`darksky_core::LookupError`] and the engine degrades the candidate.

#![forbid(unsafe_code)]

mod error;
mod http;
pub mod nominatim;
pub mod overpass;
pub mod raster;

pub use error::ProviderBuildError;
pub use nominatim::{NominatimConfig, NominatimGeocoder};
pub use overpass::{OverpassConfig, OverpassFeatureLookup};
pub use raster::{RasterLoadError, load_raster, parse_raster};

/// Default user agent for outgoing requests.
///
/// Both Overpass and Nominatim ask clients to identify themselves.
pub const DEFAULT_USER_AGENT: &str = concat!("darksky-engine/", env!("CARGO_PKG_VERSION"));
