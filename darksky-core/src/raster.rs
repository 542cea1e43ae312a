//! Dense light-pollution raster over a fixed geographic bounding box.
//!
//! The grid is loaded once and shared read-only for the lifetime of the
//! process. Cells are stored row-major with row `0` at the northern edge:
//!
//! - `row = floor((max_lat - lat) / resolution)`
//! - `col = floor((lng - min_lng) / resolution)`
//!
//! Coordinates follow the `geo` convention used across the engine:
//! `x = longitude`, `y = latitude`.

use geo::Coord;
use thiserror::Error;

use crate::sky::BortleClass;

/// Cell value used by datasets to mark cells without a measurement.
///
/// Any value outside `1..=9` is treated as uncovered; this constant is the
/// canonical one written by the dataset tooling.
pub const NO_DATA: u8 = 0;

/// Geographic bounding box of a [`RasterGrid`], in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lng: f64,
    /// Eastern edge.
    pub max_lng: f64,
}

impl GridBounds {
    /// Return `true` when `location` lies within the box, edges included.
    #[must_use]
    pub fn contains(&self, location: Coord<f64>) -> bool {
        (self.min_lat..=self.max_lat).contains(&location.y)
            && (self.min_lng..=self.max_lng).contains(&location.x)
    }

    fn validate(&self) -> Result<(), RasterError> {
        let finite = [self.min_lat, self.max_lat, self.min_lng, self.max_lng]
            .iter()
            .all(|v| v.is_finite());
        let in_range = (-90.0..=90.0).contains(&self.min_lat)
            && (-90.0..=90.0).contains(&self.max_lat)
            && (-180.0..=180.0).contains(&self.min_lng)
            && (-180.0..=180.0).contains(&self.max_lng);
        if !finite || !in_range || self.min_lat >= self.max_lat || self.min_lng >= self.max_lng {
            return Err(RasterError::InvalidBounds { bounds: *self });
        }
        Ok(())
    }
}

/// Position of a cell inside the grid.
///
/// Ordering is row-major, matching the scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellIndex {
    /// Row, counted southwards from the northern edge.
    pub row: usize,
    /// Column, counted eastwards from the western edge.
    pub col: usize,
}

/// A covered cell yielded by [`RasterGrid::covered_cells`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Position in the grid.
    pub index: CellIndex,
    /// Geographic centre of the cell.
    pub center: Coord<f64>,
    /// Measured brightness class.
    pub brightness: BortleClass,
}

/// Errors returned by [`RasterGrid::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    /// The angular resolution was zero, negative or not finite.
    #[error("raster resolution must be a positive number of degrees, got {resolution}")]
    InvalidResolution {
        /// Rejected resolution.
        resolution: f64,
    },
    /// The bounding box was inverted, degenerate or outside WGS84 ranges.
    #[error("raster bounds {bounds:?} are not a valid WGS84 box")]
    InvalidBounds {
        /// Rejected bounds.
        bounds: GridBounds,
    },
    /// No cells were supplied.
    #[error("raster must contain at least one cell")]
    Empty,
    /// A row did not have the same width as the first row.
    #[error("raster row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

/// Light-pollution raster of Bortle brightness classes.
///
/// # Examples
///
/// ```
/// use darksky_core::{GridBounds, RasterGrid};
/// use geo::Coord;
///
/// # fn main() -> Result<(), darksky_core::RasterError> {
/// let bounds = GridBounds { min_lat: 48.0, max_lat: 48.2, min_lng: 11.0, max_lng: 11.2 };
/// let grid = RasterGrid::new(0.1, bounds, vec![vec![3, 4], vec![8, 0]])?;
///
/// let class = grid.lookup(Coord { x: 11.05, y: 48.15 }).map(|c| c.get());
/// assert_eq!(class, Some(3));
/// // Cells holding no data and points outside the box are simply uncovered.
/// assert!(grid.lookup(Coord { x: 11.15, y: 48.05 }).is_none());
/// assert!(grid.lookup(Coord { x: 12.0, y: 48.1 }).is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    resolution: f64,
    bounds: GridBounds,
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl RasterGrid {
    /// Validate and construct a grid from rows of brightness classes.
    ///
    /// Rows are ordered north to south and columns west to east.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError`] when the resolution or bounds are invalid, no
    /// cells are supplied, or the rows differ in width.
    pub fn new(
        resolution: f64,
        bounds: GridBounds,
        rows: Vec<Vec<u8>>,
    ) -> Result<Self, RasterError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(RasterError::InvalidResolution { resolution });
        }
        bounds.validate()?;

        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(RasterError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, width)| width != cols)
        {
            return Err(RasterError::RaggedRow {
                row,
                expected: cols,
                found,
            });
        }

        let height = rows.len();
        Ok(Self {
            resolution,
            bounds,
            rows: height,
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Degrees per cell, identical in latitude and longitude.
    #[must_use]
    pub const fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Geographic coverage of the grid.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of rows and columns.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Brightness class at `location`, or `None` when it is not covered.
    ///
    /// Points outside the bounds, past the last stored row or column, or on a
    /// cell without data are all reported as uncovered. This is a normal
    /// outcome rather than an error: scans routinely reach past the edges.
    #[must_use]
    pub fn lookup(&self, location: Coord<f64>) -> Option<BortleClass> {
        let index = self.index_of(location)?;
        self.class_at(index)
    }

    /// Geographic centre of the cell at `index`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "cell centres are offsets in degrees; grid dimensions stay far below 2^52"
    )]
    pub const fn cell_center(&self, index: CellIndex) -> Coord<f64> {
        Coord {
            x: self.bounds.min_lng + (index.col as f64 + 0.5) * self.resolution,
            y: self.bounds.max_lat - (index.row as f64 + 0.5) * self.resolution,
        }
    }

    /// Iterate covered cells whose centre lies inside the bounds, row-major.
    pub fn covered_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| CellIndex { row, col }))
            .filter_map(move |index| {
                let center = self.cell_center(index);
                if !self.bounds.contains(center) {
                    return None;
                }
                self.class_at(index).map(|brightness| GridCell {
                    index,
                    center,
                    brightness,
                })
            })
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "offsets are finite and non-negative once the bounds check has passed"
    )]
    fn index_of(&self, location: Coord<f64>) -> Option<CellIndex> {
        if !location.x.is_finite() || !location.y.is_finite() || !self.bounds.contains(location) {
            return None;
        }
        let row = ((self.bounds.max_lat - location.y) / self.resolution).floor() as usize;
        let col = ((location.x - self.bounds.min_lng) / self.resolution).floor() as usize;
        (row < self.rows && col < self.cols).then_some(CellIndex { row, col })
    }

    fn class_at(&self, index: CellIndex) -> Option<BortleClass> {
        let offset = index.row.checked_mul(self.cols)?.checked_add(index.col)?;
        self.cells.get(offset).copied().and_then(BortleClass::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bounds() -> GridBounds {
        GridBounds {
            min_lat: 48.0,
            max_lat: 48.3,
            min_lng: 11.0,
            max_lng: 11.2,
        }
    }

    #[fixture]
    fn grid(bounds: GridBounds) -> RasterGrid {
        RasterGrid::new(0.1, bounds, vec![vec![1, 2], vec![3, NO_DATA], vec![9, 12]])
            .expect("valid grid")
    }

    #[rstest]
    #[case(Coord { x: 11.05, y: 48.25 }, Some(1))]
    #[case(Coord { x: 11.15, y: 48.25 }, Some(2))]
    #[case(Coord { x: 11.05, y: 48.15 }, Some(3))]
    #[case(Coord { x: 11.15, y: 48.15 }, None)]
    #[case(Coord { x: 11.05, y: 48.05 }, Some(9))]
    #[case(Coord { x: 11.15, y: 48.05 }, None)]
    fn lookup_follows_row_major_layout(
        grid: RasterGrid,
        #[case] location: Coord<f64>,
        #[case] expected: Option<u8>,
    ) {
        assert_eq!(grid.lookup(location).map(BortleClass::get), expected);
    }

    #[rstest]
    #[case(Coord { x: 10.99, y: 48.1 })]
    #[case(Coord { x: 11.21, y: 48.1 })]
    #[case(Coord { x: 11.1, y: 47.99 })]
    #[case(Coord { x: 11.1, y: 48.31 })]
    #[case(Coord { x: f64::NAN, y: 48.1 })]
    fn lookup_outside_bounds_is_uncovered(grid: RasterGrid, #[case] location: Coord<f64>) {
        assert!(grid.lookup(location).is_none());
    }

    #[rstest]
    fn lookup_past_stored_rows_is_uncovered() {
        let tall = GridBounds {
            min_lat: 47.0,
            max_lat: 48.0,
            min_lng: 11.0,
            max_lng: 11.1,
        };
        let grid = RasterGrid::new(0.1, tall, vec![vec![4]]).expect("valid grid");
        assert!(grid.lookup(Coord { x: 11.05, y: 47.95 }).is_some());
        assert!(grid.lookup(Coord { x: 11.05, y: 47.5 }).is_none());
    }

    #[rstest]
    fn covered_cells_skip_missing_data(grid: RasterGrid) {
        let classes: Vec<u8> = grid.covered_cells().map(|c| c.brightness.get()).collect();
        assert_eq!(classes, vec![1, 2, 3, 9]);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "test compares centres within a tolerance")]
    fn covered_cells_report_centres(grid: RasterGrid) {
        let first = grid.covered_cells().next().expect("first cell");
        assert_eq!(first.index, CellIndex { row: 0, col: 0 });
        assert!((first.center.x - 11.05).abs() < 1e-9);
        assert!((first.center.y - 48.25).abs() < 1e-9);
    }

    #[rstest]
    fn covered_cells_skip_centres_outside_bounds(bounds: GridBounds) {
        // A third column would have its centre east of `max_lng`.
        let grid = RasterGrid::new(0.1, bounds, vec![vec![1, 1, 1]]).expect("valid grid");
        assert_eq!(grid.covered_cells().count(), 2);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_resolution(bounds: GridBounds, #[case] resolution: f64) {
        let err = RasterGrid::new(resolution, bounds, vec![vec![1]]).expect_err("invalid");
        assert!(matches!(err, RasterError::InvalidResolution { .. }));
    }

    #[rstest]
    fn rejects_inverted_bounds(bounds: GridBounds) {
        let inverted = GridBounds {
            min_lat: bounds.max_lat,
            max_lat: bounds.min_lat,
            ..bounds
        };
        let err = RasterGrid::new(0.1, inverted, vec![vec![1]]).expect_err("invalid");
        assert!(matches!(err, RasterError::InvalidBounds { .. }));
    }

    #[rstest]
    fn rejects_empty_and_ragged_rows(bounds: GridBounds) {
        assert_eq!(
            RasterGrid::new(0.1, bounds, Vec::new()),
            Err(RasterError::Empty)
        );
        assert_eq!(
            RasterGrid::new(0.1, bounds, vec![vec![1, 2], vec![3]]),
            Err(RasterError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }
}
