//! Reverse geocoding backed by Nominatim.
//!
//! [`NominatimGeocoder`] implements [`darksky_core::ReverseGeocoder`] using
//! the `/reverse` endpoint with `format=jsonv2`. Nominatim reports "nothing
//! here" as a JSON `error` member with a success status; that and blank names
//! both resolve to `None`.

mod provider;
mod response;

pub use provider::{DEFAULT_NOMINATIM_URL, NominatimConfig, NominatimGeocoder};
