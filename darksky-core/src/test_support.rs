//! Deterministic collaborator doubles and raster builders used by unit,
//! behaviour and downstream tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;

use crate::{
    CellIndex, FeatureKind, FeatureLookup, GridBounds, LookupError, NO_DATA, RasterError,
    RasterGrid, ReverseGeocoder, RoadFeature,
};

/// Munich city centre, used by several scenarios.
pub const MUNICH: Coord<f64> = Coord {
    x: 11.582,
    y: 48.1351,
};

/// Canned answer for a [`StubFeatureLookup`] query.
#[derive(Debug, Clone, PartialEq)]
pub enum StubResponse {
    /// Succeed with no features.
    NoFeatures,
    /// Succeed with one feature of this kind at the queried location.
    Nearby(FeatureKind),
    /// Succeed with a fixed feature list.
    Features(Vec<RoadFeature>),
    /// Fail with the given error.
    Error(LookupError),
    /// Sleep on the Tokio clock, then answer with the inner response.
    Delayed(Duration, Box<StubResponse>),
}

/// Stub `FeatureLookup` returning pre-configured responses.
///
/// A default response applies everywhere; individual coordinates can be
/// overridden. The stub counts every query it receives.
///
/// # Example
///
/// ```
/// use darksky_core::FeatureKind;
/// use darksky_core::test_support::{StubFeatureLookup, StubResponse};
/// use geo::Coord;
///
/// let lookup = StubFeatureLookup::new(StubResponse::NoFeatures)
///     .with_response_at(Coord { x: 11.0, y: 48.0 }, StubResponse::Nearby(FeatureKind::Road));
/// assert_eq!(lookup.call_count(), 0);
/// ```
#[derive(Debug)]
pub struct StubFeatureLookup {
    default: StubResponse,
    overrides: Vec<(Coord<f64>, StubResponse)>,
    calls: AtomicUsize,
}

impl StubFeatureLookup {
    /// Create a stub answering every query with `default`.
    #[must_use]
    pub const fn new(default: StubResponse) -> Self {
        Self {
            default,
            overrides: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Stub reporting a car park at every queried location.
    #[must_use]
    pub const fn parking_everywhere() -> Self {
        Self::new(StubResponse::Nearby(FeatureKind::Parking))
    }

    /// Stub reporting no features anywhere.
    #[must_use]
    pub const fn no_access_anywhere() -> Self {
        Self::new(StubResponse::NoFeatures)
    }

    /// Answer queries for `location` with `response` instead of the default.
    #[must_use]
    pub fn with_response_at(mut self, location: Coord<f64>, response: StubResponse) -> Self {
        self.overrides.push((location, response));
        self
    }

    /// Number of queries received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn response_for(&self, location: Coord<f64>) -> &StubResponse {
        self.overrides
            .iter()
            .find(|(at, _)| same_location(*at, location))
            .map_or(&self.default, |(_, response)| response)
    }
}

#[expect(clippy::float_arithmetic, reason = "coordinate comparison within a tolerance")]
const fn same_location(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

async fn answer(
    response: &StubResponse,
    location: Coord<f64>,
) -> Result<Vec<RoadFeature>, LookupError> {
    let mut current = response;
    while let StubResponse::Delayed(delay, inner) = current {
        tokio::time::sleep(*delay).await;
        current = inner.as_ref();
    }
    match current {
        StubResponse::NoFeatures | StubResponse::Delayed(..) => Ok(Vec::new()),
        StubResponse::Nearby(kind) => Ok(vec![RoadFeature::new(*kind, location)]),
        StubResponse::Features(features) => Ok(features.clone()),
        StubResponse::Error(error) => Err(error.clone()),
    }
}

#[async_trait]
impl FeatureLookup for StubFeatureLookup {
    async fn query(
        &self,
        location: Coord<f64>,
        _search_radius_m: f64,
    ) -> Result<Vec<RoadFeature>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        answer(self.response_for(location), location).await
    }
}

/// Stub `ReverseGeocoder` with a single canned answer.
#[derive(Debug, Clone)]
pub struct StubGeocoder {
    response: Result<Option<String>, LookupError>,
}

impl StubGeocoder {
    /// Resolve every location to `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            response: Ok(Some(name.into())),
        }
    }

    /// Resolve every location to no name.
    #[must_use]
    pub const fn unnamed() -> Self {
        Self { response: Ok(None) }
    }

    /// Fail every resolution with `error`.
    #[must_use]
    pub const fn failing(error: LookupError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for StubGeocoder {
    async fn resolve(&self, _location: Coord<f64>) -> Result<Option<String>, LookupError> {
        self.response.clone()
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "cell counts derive from finite, ordered bounds; the cast saturates"
)]
fn cells_along(min: f64, max: f64, resolution: f64) -> usize {
    (((max - min) / resolution).round() as usize).max(1)
}

/// Grid covering `bounds` with every cell set to `class`.
///
/// # Errors
///
/// Propagates [`RasterError`] from [`RasterGrid::new`].
pub fn uniform_grid(
    bounds: GridBounds,
    resolution: f64,
    class: u8,
) -> Result<RasterGrid, RasterError> {
    let rows = cells_along(bounds.min_lat, bounds.max_lat, resolution);
    let cols = cells_along(bounds.min_lng, bounds.max_lng, resolution);
    RasterGrid::new(resolution, bounds, vec![vec![class; cols]; rows])
}

/// Grid covering `bounds` with only the listed cells holding data.
///
/// Cells outside the grid are ignored.
///
/// # Errors
///
/// Propagates [`RasterError`] from [`RasterGrid::new`].
pub fn sparse_grid(
    bounds: GridBounds,
    resolution: f64,
    cells: &[(CellIndex, u8)],
) -> Result<RasterGrid, RasterError> {
    let rows = cells_along(bounds.min_lat, bounds.max_lat, resolution);
    let cols = cells_along(bounds.min_lng, bounds.max_lng, resolution);
    let mut data = vec![vec![NO_DATA; cols]; rows];
    for (index, class) in cells {
        if let Some(cell) = data
            .get_mut(index.row)
            .and_then(|row| row.get_mut(index.col))
        {
            *cell = *class;
        }
    }
    RasterGrid::new(resolution, bounds, data)
}

/// A 3°×3° box around Munich at 0.1° resolution: 30×30 cells.
#[must_use]
pub const fn bavaria_bounds() -> GridBounds {
    GridBounds {
        min_lat: 47.0,
        max_lat: 50.0,
        min_lng: 10.0,
        max_lng: 13.0,
    }
}
