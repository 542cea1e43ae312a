//! Command-line interface for dark-sky spot searches.
//!
//! Two subcommands share one set of service options:
//!
//! - `darksky spots` returns the darkest accessible spots within a radius.
//! - `darksky bands` returns the best spot in each overview band.
//!
//! Options layer as defaults < configuration file < `DARKSKY_CMDS_*`
//! environment variables < flags. Results are printed to stdout as pretty
//! JSON; logs go to stderr.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod logging;
mod search;
mod services;

pub use error::CliError;
use search::{BandsArgs, SpotsArgs};

const ARG_LAT: &str = "lat";
const ARG_LNG: &str = "lng";
const ARG_RASTER: &str = "raster";
const ARG_MAX_DISTANCE_KM: &str = "max-distance-km";
const ARG_COUNT: &str = "count";
const ARG_MIN_ACCESSIBLE: &str = "min-accessible";
const ARG_OVERPASS_URL: &str = "overpass-url";
const ARG_NOMINATIM_URL: &str = "nominatim-url";
const ARG_LOOKUP_TIMEOUT_SECS: &str = "lookup-timeout-secs";
const ARG_LOG_LEVEL: &str = "log-level";

const ENV_SPOTS_LAT: &str = "DARKSKY_CMDS_SPOTS_LAT";
const ENV_SPOTS_LNG: &str = "DARKSKY_CMDS_SPOTS_LNG";
const ENV_SPOTS_RASTER: &str = "DARKSKY_CMDS_SPOTS_RASTER";
const ENV_BANDS_LAT: &str = "DARKSKY_CMDS_BANDS_LAT";
const ENV_BANDS_LNG: &str = "DARKSKY_CMDS_BANDS_LNG";
const ENV_BANDS_RASTER: &str = "DARKSKY_CMDS_BANDS_RASTER";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// raster cannot be loaded, the search rejects its input, or the result
/// cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Spots(args) => search::run_spots(args),
        Command::Bands(args) => search::run_bands(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "darksky",
    about = "Find dark-sky observing spots near a location",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the darkest reachable spots within a radius.
    Spots(SpotsArgs),
    /// Show the best spot nearby, within a day trip and on an expedition.
    Bands(BandsArgs),
}

#[cfg(test)]
mod tests;
