//! Great-circle distances between WGS84 coordinates.

use geo::{Coord, Distance, Haversine, Point};

const METRES_PER_KM: f64 = 1000.0;

/// Haversine distance between two coordinates in metres.
#[must_use]
pub fn haversine_distance_m(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to))
}

/// Haversine distance between two coordinates in kilometres.
///
/// Used both for annulus membership and for the distance reported to
/// callers, so the two always agree.
///
/// # Examples
///
/// ```
/// use darksky_core::haversine_distance_km;
/// use geo::Coord;
///
/// let munich = Coord { x: 11.582, y: 48.1351 };
/// let berlin = Coord { x: 13.405, y: 52.52 };
/// let km = haversine_distance_km(munich, berlin);
/// assert!((km - 504.0).abs() < 2.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "unit conversion from metres")]
pub fn haversine_distance_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    haversine_distance_m(from, to) / METRES_PER_KM
}
