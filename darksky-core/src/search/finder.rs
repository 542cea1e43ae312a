//! Search orchestration.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::join_all;
use geo::Coord;
use log::{debug, info, warn};
use tokio::runtime::{Handle, RuntimeFlavor};

use crate::accessibility::{FeatureLookup, LookupError};
use crate::augment::Augmenter;
use crate::geocode::ReverseGeocoder;
use crate::rank::rank_and_take;
use crate::raster::RasterGrid;
use crate::scan::scan;

use super::band::{RadiusBand, claimed_by_inner_band};
use super::banded::select_best;
use super::config::SearchConfig;
use super::error::{SearchError, validate_origin};
use super::nearest::select_nearest;
use super::query::SpotQuery;
use super::spot::{BandedSearch, ScoredSpot};

/// Finds dark-sky spots around an origin.
///
/// The finder holds the brightness raster behind an [`Arc`] so several
/// finders, or several concurrent requests on one finder, share a single
/// read-only copy. Requests carry no state between calls: identical raster
/// data and identical collaborator answers always give identical results.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use darksky_core::{SpotFinder, SpotQuery};
/// use darksky_core::test_support::{MUNICH, StubFeatureLookup, StubGeocoder, bavaria_bounds, uniform_grid};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let grid = Arc::new(uniform_grid(bavaria_bounds(), 0.1, 4)?);
/// let finder = SpotFinder::new(grid, StubFeatureLookup::parking_everywhere(), StubGeocoder::unnamed());
/// let spots = finder.find_spots(&SpotQuery::new(MUNICH, 20.0, 3)).await?;
/// assert_eq!(spots.len(), 3);
/// assert!(spots.iter().all(|spot| spot.has_road_access));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SpotFinder<L, G> {
    grid: Arc<RasterGrid>,
    lookup: L,
    geocoder: G,
    config: SearchConfig,
}

impl<L, G> SpotFinder<L, G>
where
    L: FeatureLookup,
    G: ReverseGeocoder,
{
    /// Create a finder with the default [`SearchConfig`].
    #[must_use]
    pub fn new(grid: Arc<RasterGrid>, lookup: L, geocoder: G) -> Self {
        Self {
            grid,
            lookup,
            geocoder,
            config: SearchConfig::default(),
        }
    }

    /// Create a finder with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] when `config` fails
    /// [`SearchConfig::validate`].
    pub fn with_config(
        grid: Arc<RasterGrid>,
        lookup: L,
        geocoder: G,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            grid,
            lookup,
            geocoder,
            config,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The shared raster.
    #[must_use]
    pub fn grid(&self) -> &RasterGrid {
        &self.grid
    }

    /// Return up to `desired_results` dark spots within `max_distance_km`.
    ///
    /// A pool of the darkest candidates is augmented concurrently. When
    /// enough of them have road access only accessible spots are returned;
    /// otherwise remote spots are returned and flagged. No raster coverage in
    /// range yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] when the query fails [`SpotQuery::validate`].
    pub async fn find_spots(&self, query: &SpotQuery) -> Result<Vec<ScoredSpot>, SearchError> {
        query.validate()?;

        let candidates = scan(&self.grid, query.origin, 0.0, query.max_distance_km);
        if candidates.is_empty() {
            info!(
                "no raster coverage within {} km of ({}, {})",
                query.max_distance_km, query.origin.y, query.origin.x
            );
            return Ok(Vec::new());
        }

        let pool_size = self.config.nearest_pool_size.max(query.desired_results);
        let pool = rank_and_take(candidates, pool_size);
        let augmented = Augmenter::new(&self.lookup, &self.config)
            .augment_all(pool)
            .await;

        let spots: Vec<ScoredSpot> =
            select_nearest(augmented, query.desired_results, query.minimum_accessible)
                .iter()
                .map(ScoredSpot::from_augmented)
                .collect();
        debug!("nearest search returned {} spots", spots.len());
        Ok(spots)
    }

    /// Return the best spot in each band together with the origin's name.
    ///
    /// Bands are searched concurrently with each other and with the reverse
    /// geocoding of the origin. Each band contributes at most one spot,
    /// chosen by composite score; bands without coverage are left out. A
    /// cell within reach of several bands is only offered to the innermost
    /// one, so no spot is reported twice. The result keeps the input band
    /// order. A failed geocode leaves `origin_name` empty.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] for an invalid origin or any invalid band.
    pub async fn find_best_per_band(
        &self,
        origin: Coord<f64>,
        bands: &[RadiusBand],
    ) -> Result<BandedSearch, SearchError> {
        validate_origin(origin)?;
        for band in bands {
            band.validate()?;
        }

        let searches = join_all(
            (0..bands.len()).map(|position| self.best_in_band(origin, bands, position)),
        );
        let (origin_name, per_band) = tokio::join!(self.origin_name(origin), searches);
        let spots: Vec<ScoredSpot> = per_band.into_iter().flatten().collect();

        info!(
            "banded search found spots in {} of {} bands",
            spots.len(),
            bands.len()
        );
        Ok(BandedSearch { origin_name, spots })
    }

    async fn best_in_band(
        &self,
        origin: Coord<f64>,
        bands: &[RadiusBand],
        position: usize,
    ) -> Option<ScoredSpot> {
        let band = bands.get(position)?;
        let mut candidates = scan(&self.grid, origin, band.min_km, band.max_km);
        candidates.retain(|candidate| {
            !claimed_by_inner_band(bands, position, candidate.distance_km)
        });
        if candidates.is_empty() {
            debug!("band {:?} has no raster coverage", band.label);
            return None;
        }
        let pool = rank_and_take(candidates, self.config.band_pool_size);
        let augmented = Augmenter::new(&self.lookup, &self.config)
            .augment_all(pool)
            .await;
        select_best(augmented, &self.config)
            .map(|(best, score)| ScoredSpot::from_augmented(&best).in_band(band, score))
    }

    async fn origin_name(&self, origin: Coord<f64>) -> Option<String> {
        let timeout = self.config.lookup_timeout;
        let outcome = tokio::time::timeout(timeout, self.geocoder.resolve(origin))
            .await
            .unwrap_or(Err(LookupError::Timeout { timeout }));
        outcome.unwrap_or_else(|err| {
            warn!("reverse geocoding ({}, {}) failed: {err}", origin.y, origin.x);
            None
        })
    }

    /// Blocking form of [`Self::find_spots`].
    ///
    /// # Runtime requirements
    ///
    /// Outside any Tokio runtime a private current-thread runtime drives the
    /// search. Inside a multi-threaded runtime the caller's runtime is used
    /// via [`tokio::task::block_in_place`]. Calling from a current-thread
    /// runtime is refused, since blocking it would stall the timers the
    /// search depends on.
    ///
    /// # Errors
    ///
    /// As [`Self::find_spots`], plus [`SearchError::Runtime`] when no
    /// runtime can drive the search.
    pub fn find_spots_blocking(&self, query: &SpotQuery) -> Result<Vec<ScoredSpot>, SearchError> {
        block_on(self.find_spots(query))?
    }

    /// Blocking form of [`Self::find_best_per_band`].
    ///
    /// Runtime requirements match [`Self::find_spots_blocking`].
    ///
    /// # Errors
    ///
    /// As [`Self::find_best_per_band`], plus [`SearchError::Runtime`] when no
    /// runtime can drive the search.
    pub fn find_best_per_band_blocking(
        &self,
        origin: Coord<f64>,
        bands: &[RadiusBand],
    ) -> Result<BandedSearch, SearchError> {
        block_on(self.find_best_per_band(origin, bands))?
    }
}

fn block_on<F: Future>(future: F) -> Result<F::Output, SearchError> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Ok(tokio::task::block_in_place(|| handle.block_on(future)))
        }
        Ok(_) => Err(SearchError::Runtime(std::io::Error::other(
            "blocking search called from a current-thread Tokio runtime",
        ))),
        Err(_) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .map_err(SearchError::Runtime)?;
            Ok(runtime.block_on(future))
        }
    }
}
