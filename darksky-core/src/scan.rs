//! Enumerate raster cells inside an annulus around an origin.
//!
//! The scan is exhaustive over the grid. Membership is decided with the same
//! haversine function used for reported distances, with inclusive bounds on
//! both radii.

use geo::Coord;
use log::debug;

use crate::candidate::Candidate;
use crate::distance::haversine_distance_km;
use crate::raster::RasterGrid;

/// Collect every covered cell with `min_radius_km <= distance <= max_radius_km`.
///
/// Candidates are returned in row-major grid order. An annulus that misses
/// the raster entirely yields an empty list.
///
/// # Examples
///
/// ```
/// use darksky_core::{GridBounds, RasterGrid, scan};
/// use geo::Coord;
///
/// # fn main() -> Result<(), darksky_core::RasterError> {
/// let bounds = GridBounds { min_lat: 48.0, max_lat: 48.2, min_lng: 11.0, max_lng: 11.2 };
/// let grid = RasterGrid::new(0.1, bounds, vec![vec![3, 4], vec![5, 6]])?;
/// let origin = Coord { x: 11.05, y: 48.15 };
///
/// let disk = scan(&grid, origin, 0.0, 50.0);
/// assert_eq!(disk.len(), 4);
/// let far_away = scan(&grid, Coord { x: 0.0, y: 0.0 }, 0.0, 50.0);
/// assert!(far_away.is_empty());
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn scan(
    grid: &RasterGrid,
    origin: Coord<f64>,
    min_radius_km: f64,
    max_radius_km: f64,
) -> Vec<Candidate> {
    let candidates: Vec<Candidate> = grid
        .covered_cells()
        .filter_map(|cell| {
            let distance_km = haversine_distance_km(origin, cell.center);
            (min_radius_km..=max_radius_km)
                .contains(&distance_km)
                .then_some(Candidate {
                    location: cell.center,
                    brightness: cell.brightness,
                    distance_km,
                    cell: cell.index,
                })
        })
        .collect();
    debug!(
        "scanned annulus {min_radius_km}..={max_radius_km} km around ({}, {}): {} candidates",
        origin.y,
        origin.x,
        candidates.len()
    );
    candidates
}
