use geo::Coord;
use thiserror::Error;

/// Errors returned by [`crate::SpotFinder`] operations.
///
/// Only structurally invalid input is an error. Sparse coverage, empty bands
/// and failed lookups all produce a (possibly empty) result instead.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The origin was not a finite WGS84 coordinate.
    #[error("origin ({lat}, {lng}) is not a valid coordinate")]
    InvalidOrigin {
        /// Latitude supplied.
        lat: f64,
        /// Longitude supplied.
        lng: f64,
    },
    /// A radius was negative, zero where it must be positive, or not finite.
    #[error("{field} must be a positive number of kilometres, got {value}")]
    InvalidRadius {
        /// Name of the offending parameter.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// A radius band had its inner radius beyond its outer radius.
    #[error("band {label:?} has inner radius {min_km} km beyond outer radius {max_km} km")]
    InvertedBand {
        /// Band label.
        label: String,
        /// Inner radius.
        min_km: f64,
        /// Outer radius.
        max_km: f64,
    },
    /// Zero results were requested.
    #[error("at least one result must be requested")]
    ZeroResultCount,
    /// A configuration field was unusable.
    #[error("invalid search configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// A runtime for a blocking call could not be created.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Reject origins that are not finite WGS84 coordinates.
pub(crate) fn validate_origin(origin: Coord<f64>) -> Result<(), SearchError> {
    let valid = origin.x.is_finite()
        && origin.y.is_finite()
        && (-90.0..=90.0).contains(&origin.y)
        && (-180.0..=180.0).contains(&origin.x);
    if valid {
        Ok(())
    } else {
        Err(SearchError::InvalidOrigin {
            lat: origin.y,
            lng: origin.x,
        })
    }
}
