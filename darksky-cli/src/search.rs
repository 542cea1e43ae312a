//! The `spots` and `bands` subcommands.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use darksky_core::{
    FeatureLookup, RadiusBand, ReverseGeocoder, SpotFinder, SpotQuery,
};
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::logging::{self, DEFAULT_LOG_LEVEL};
use crate::services::{ServiceConfig, ServiceOptions};
use crate::{
    ARG_COUNT, ARG_LAT, ARG_LNG, ARG_LOG_LEVEL, ARG_LOOKUP_TIMEOUT_SECS, ARG_MAX_DISTANCE_KM,
    ARG_MIN_ACCESSIBLE, ARG_NOMINATIM_URL, ARG_OVERPASS_URL, ARG_RASTER, CliError, ENV_BANDS_LAT,
    ENV_BANDS_LNG, ENV_BANDS_RASTER, ENV_SPOTS_LAT, ENV_SPOTS_LNG, ENV_SPOTS_RASTER,
};

/// Search radius used when none is configured.
pub(crate) const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;
/// Result count used when none is configured.
pub(crate) const DEFAULT_COUNT: usize = 3;

/// CLI arguments for the `spots` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Scan the brightness raster around a location, check the \
                 darkest cells for nearby roads and car parks, and print the \
                 best spots as JSON. When none of the candidates is reachable \
                 the darkest remote spots are printed instead, flagged as \
                 inaccessible.",
    about = "List the darkest reachable spots within a radius"
)]
#[ortho_config(prefix = "DARKSKY")]
pub(crate) struct SpotsArgs {
    /// Latitude of the search origin in decimal degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search origin in decimal degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Search radius in kilometres (default 50).
    #[arg(long = ARG_MAX_DISTANCE_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) max_distance_km: Option<f64>,
    /// Number of spots to return (default 3).
    #[arg(long = ARG_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) count: Option<usize>,
    /// Reachable spots required before remote ones are excluded (default 1).
    #[arg(long = ARG_MIN_ACCESSIBLE, value_name = "n")]
    #[serde(default)]
    pub(crate) min_accessible: Option<usize>,
    /// Path to the brightness raster JSON document.
    #[arg(long = ARG_RASTER, value_name = "path")]
    #[serde(default)]
    pub(crate) raster: Option<Utf8PathBuf>,
    /// Overpass API root (e.g. "https://overpass-api.de/api").
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Nominatim service root.
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// Deadline for each external call, in seconds (default 5).
    #[arg(long = ARG_LOOKUP_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) lookup_timeout_secs: Option<u64>,
    /// Log filter for stderr, e.g. "info" (default "warn").
    #[arg(long = ARG_LOG_LEVEL, value_name = "spec")]
    #[serde(default)]
    pub(crate) log_level: Option<String>,
}

/// CLI arguments for the `bands` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Pick one spot in each of three rings around a location \
                 (0-10 km, 10-50 km and 50-150 km), trading darkness against \
                 how close the nearest road is. Rings without raster coverage \
                 are left out. The origin's place name is included when it can \
                 be resolved.",
    about = "Show the best spot nearby, within a day trip and on an expedition"
)]
#[ortho_config(prefix = "DARKSKY")]
pub(crate) struct BandsArgs {
    /// Latitude of the search origin in decimal degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search origin in decimal degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Path to the brightness raster JSON document.
    #[arg(long = ARG_RASTER, value_name = "path")]
    #[serde(default)]
    pub(crate) raster: Option<Utf8PathBuf>,
    /// Overpass API root (e.g. "https://overpass-api.de/api").
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Nominatim service root.
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// Deadline for each external call, in seconds (default 5).
    #[arg(long = ARG_LOOKUP_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) lookup_timeout_secs: Option<u64>,
    /// Log filter for stderr, e.g. "info" (default "warn").
    #[arg(long = ARG_LOG_LEVEL, value_name = "spec")]
    #[serde(default)]
    pub(crate) log_level: Option<String>,
}

/// Resolved `spots` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpotsConfig {
    pub(crate) origin: Coord<f64>,
    pub(crate) max_distance_km: f64,
    pub(crate) count: usize,
    pub(crate) min_accessible: usize,
    pub(crate) services: ServiceConfig,
    pub(crate) log_level: String,
}

impl SpotsConfig {
    pub(crate) fn query(&self) -> SpotQuery {
        SpotQuery::new(self.origin, self.max_distance_km, self.count)
            .with_minimum_accessible(self.min_accessible)
    }
}

/// Resolved `bands` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BandsConfig {
    pub(crate) origin: Coord<f64>,
    pub(crate) services: ServiceConfig,
    pub(crate) log_level: String,
}

impl SpotsArgs {
    pub(crate) fn into_config(self) -> Result<SpotsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SpotsConfig::try_from(merged)
    }
}

impl BandsArgs {
    pub(crate) fn into_config(self) -> Result<BandsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BandsConfig::try_from(merged)
    }
}

impl TryFrom<SpotsArgs> for SpotsConfig {
    type Error = CliError;

    fn try_from(args: SpotsArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_SPOTS_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_SPOTS_LNG,
        })?;
        let services = ServiceConfig::resolve(
            ServiceOptions {
                raster: args.raster,
                overpass_url: args.overpass_url,
                nominatim_url: args.nominatim_url,
                lookup_timeout_secs: args.lookup_timeout_secs,
            },
            ENV_SPOTS_RASTER,
        )?;
        Ok(Self {
            origin: Coord { x: lng, y: lat },
            max_distance_km: args.max_distance_km.unwrap_or(DEFAULT_MAX_DISTANCE_KM),
            count: args.count.unwrap_or(DEFAULT_COUNT),
            min_accessible: args.min_accessible.unwrap_or(1),
            services,
            log_level: args
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

impl TryFrom<BandsArgs> for BandsConfig {
    type Error = CliError;

    fn try_from(args: BandsArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_BANDS_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_BANDS_LNG,
        })?;
        let services = ServiceConfig::resolve(
            ServiceOptions {
                raster: args.raster,
                overpass_url: args.overpass_url,
                nominatim_url: args.nominatim_url,
                lookup_timeout_secs: args.lookup_timeout_secs,
            },
            ENV_BANDS_RASTER,
        )?;
        Ok(Self {
            origin: Coord { x: lng, y: lat },
            services,
            log_level: args
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

pub(crate) fn run_spots(args: SpotsArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let _logger = logging::init(&config.log_level)?;
    let finder = config.services.build_finder()?;
    let mut stdout = std::io::stdout().lock();
    run_spots_with(&config, &finder, &mut stdout)
}

pub(crate) fn run_bands(args: BandsArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let _logger = logging::init(&config.log_level)?;
    let finder = config.services.build_finder()?;
    let mut stdout = std::io::stdout().lock();
    run_bands_with(&config, &finder, &mut stdout)
}

/// Run a nearest-N search and print the spots.
pub(crate) fn run_spots_with<L, G>(
    config: &SpotsConfig,
    finder: &SpotFinder<L, G>,
    writer: &mut dyn Write,
) -> Result<(), CliError>
where
    L: FeatureLookup,
    G: ReverseGeocoder,
{
    let spots = finder.find_spots_blocking(&config.query())?;
    write_json(writer, &spots)
}

/// Run the overview banded search and print the result.
pub(crate) fn run_bands_with<L, G>(
    config: &BandsConfig,
    finder: &SpotFinder<L, G>,
    writer: &mut dyn Write,
) -> Result<(), CliError>
where
    L: FeatureLookup,
    G: ReverseGeocoder,
{
    let result = finder.find_best_per_band_blocking(config.origin, &RadiusBand::overview())?;
    write_json(writer, &result)
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn spots_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SpotsConfig, CliError> {
    let merged = SpotsArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SpotsConfig::try_from(merged)
}
