use std::time::Duration;

use async_trait::async_trait;
use darksky_core::{FeatureLookup, LookupError, RoadFeature};
use geo::Coord;
use log::debug;
use reqwest::Client;
use url::Url;

use super::query::accessibility_query;
use super::response::OverpassResponse;
use crate::http::{build_client, endpoint_url, lookup_error};
use crate::{DEFAULT_USER_AGENT, ProviderBuildError};

/// Public Overpass API instance.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for [`OverpassFeatureLookup`].
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// API root; queries are posted to `{base_url}/interpreter`.
    pub base_url: String,
    /// Deadline for each request. Also sent to Overpass as the server-side
    /// query timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OVERPASS_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration for the given API root.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`FeatureLookup`] backed by an Overpass API server.
///
/// The lookup is cheap to share: one instance serves every concurrent query
/// of a search through its pooled HTTP client.
#[derive(Debug, Clone)]
pub struct OverpassFeatureLookup {
    client: Client,
    endpoint: Url,
    config: OverpassConfig,
}

impl OverpassFeatureLookup {
    /// Create a lookup against `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OverpassConfig::new(base_url))
    }

    /// Create a lookup with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: OverpassConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = endpoint_url(&config.base_url, "interpreter")?;
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &OverpassConfig {
        &self.config
    }
}

#[async_trait]
impl FeatureLookup for OverpassFeatureLookup {
    async fn query(
        &self,
        location: Coord<f64>,
        search_radius_m: f64,
    ) -> Result<Vec<RoadFeature>, LookupError> {
        let timeout = self.config.timeout;
        let query = accessibility_query(location, search_radius_m, timeout.as_secs().max(1));

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .await
            .map_err(|err| lookup_error(&err, &self.endpoint, timeout))?
            .error_for_status()
            .map_err(|err| lookup_error(&err, &self.endpoint, timeout))?;

        let payload: OverpassResponse = response
            .json()
            .await
            .map_err(|err| lookup_error(&err, &self.endpoint, timeout))?;

        let features = payload.into_features();
        debug!(
            "overpass found {} features around ({}, {})",
            features.len(),
            location.y,
            location.x
        );
        Ok(features)
    }
}
