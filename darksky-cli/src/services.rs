//! Wiring of the raster and HTTP collaborators shared by both subcommands.

use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use darksky_core::{SearchConfig, SpotFinder};
use darksky_data::nominatim::{DEFAULT_NOMINATIM_URL, NominatimConfig, NominatimGeocoder};
use darksky_data::overpass::{DEFAULT_OVERPASS_URL, OverpassConfig, OverpassFeatureLookup};
use darksky_data::load_raster;
use log::info;

use crate::{ARG_RASTER, CliError};

/// Finder backed by the live services.
pub(crate) type LiveFinder = SpotFinder<OverpassFeatureLookup, NominatimGeocoder>;

/// Per-call deadline used when none is configured.
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Service options as merged from all configuration layers.
#[derive(Debug, Clone, Default)]
pub(crate) struct ServiceOptions {
    pub(crate) raster: Option<Utf8PathBuf>,
    pub(crate) overpass_url: Option<String>,
    pub(crate) nominatim_url: Option<String>,
    pub(crate) lookup_timeout_secs: Option<u64>,
}

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceConfig {
    /// Path to the raster JSON document.
    pub(crate) raster: Utf8PathBuf,
    /// Overpass API root.
    pub(crate) overpass_url: String,
    /// Nominatim service root.
    pub(crate) nominatim_url: String,
    /// Deadline for every external call.
    pub(crate) lookup_timeout: Duration,
}

impl ServiceConfig {
    /// Apply defaults, requiring a raster path.
    pub(crate) fn resolve(
        options: ServiceOptions,
        raster_env: &'static str,
    ) -> Result<Self, CliError> {
        let raster = options.raster.ok_or(CliError::MissingArgument {
            field: ARG_RASTER,
            env: raster_env,
        })?;
        Ok(Self {
            raster,
            overpass_url: options
                .overpass_url
                .unwrap_or_else(|| DEFAULT_OVERPASS_URL.to_owned()),
            nominatim_url: options
                .nominatim_url
                .unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_owned()),
            lookup_timeout: Duration::from_secs(
                options
                    .lookup_timeout_secs
                    .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS),
            ),
        })
    }

    /// Search policy with the configured deadline.
    pub(crate) fn search_config(&self) -> SearchConfig {
        SearchConfig::default().with_lookup_timeout(self.lookup_timeout)
    }

    /// Load the raster and connect the live services.
    pub(crate) fn build_finder(&self) -> Result<LiveFinder, CliError> {
        let grid = load_raster(&self.raster)?;
        let (rows, cols) = grid.dimensions();
        info!("loaded {rows}x{cols} raster from {}", self.raster);

        let lookup = OverpassFeatureLookup::with_config(
            OverpassConfig::new(self.overpass_url.clone()).with_timeout(self.lookup_timeout),
        )
        .map_err(|source| CliError::BuildProvider {
            service: "Overpass",
            url: self.overpass_url.clone(),
            source,
        })?;
        let geocoder = NominatimGeocoder::with_config(
            NominatimConfig::new(self.nominatim_url.clone()).with_timeout(self.lookup_timeout),
        )
        .map_err(|source| CliError::BuildProvider {
            service: "Nominatim",
            url: self.nominatim_url.clone(),
            source,
        })?;

        Ok(SpotFinder::with_config(
            Arc::new(grid),
            lookup,
            geocoder,
            self.search_config(),
        )?)
    }
}
