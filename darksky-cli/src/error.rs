//! Error types emitted by the `darksky` CLI.

use std::sync::Arc;

use darksky_core::SearchError;
use darksky_data::{ProviderBuildError, RasterLoadError};
use thiserror::Error;

/// Errors emitted by the `darksky` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The log filter was rejected or the logger failed to start.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
    /// The brightness raster could not be loaded.
    #[error(transparent)]
    LoadRaster(#[from] RasterLoadError),
    /// An HTTP collaborator could not be built.
    #[error("failed to set up {service} client for {url}: {source}")]
    BuildProvider {
        /// Which service.
        service: &'static str,
        /// Configured base URL.
        url: String,
        /// Construction error.
        #[source]
        source: ProviderBuildError,
    },
    /// The search rejected its input or configuration.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
    /// Results could not be encoded.
    #[error("failed to serialise results: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Results could not be written to stdout.
    #[error("failed to write results: {0}")]
    WriteOutput(#[source] std::io::Error),
}
