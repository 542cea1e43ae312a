use std::time::Duration;

use async_trait::async_trait;
use darksky_core::{LookupError, ReverseGeocoder};
use geo::Coord;
use log::debug;
use reqwest::Client;
use url::Url;

use super::response::ReverseResponse;
use crate::http::{build_client, endpoint_url, lookup_error};
use crate::{DEFAULT_USER_AGENT, ProviderBuildError};

/// Public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Service root; requests go to `{base_url}/reverse`.
    pub base_url: String,
    /// Deadline for each request.
    pub timeout: Duration,
    /// User agent string for requests. Nominatim's usage policy requires one
    /// that identifies the application.
    pub user_agent: String,
    /// Preferred result language, sent as `accept-language`.
    pub language: Option<String>,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            language: None,
        }
    }
}

impl NominatimConfig {
    /// Create a configuration for the given service root.
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

    /// Ask for names in the given language, e.g. `"de"`.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// [`ReverseGeocoder`] backed by a Nominatim server.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: Url,
    config: NominatimConfig,
}

impl NominatimGeocoder {
    /// Create a geocoder against `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(NominatimConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: NominatimConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = endpoint_url(&config.base_url, "reverse")?;
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &NominatimConfig {
        &self.config
    }

    fn reverse_url(&self, location: Coord<f64>) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("format", "jsonv2")
                .append_pair("lat", &location.y.to_string())
                .append_pair("lon", &location.x.to_string());
            if let Some(language) = &self.config.language {
                pairs.append_pair("accept-language", language);
            }
        }
        url
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn resolve(&self, location: Coord<f64>) -> Result<Option<String>, LookupError> {
        let url = self.reverse_url(location);
        let timeout = self.config.timeout;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| lookup_error(&err, &url, timeout))?
            .error_for_status()
            .map_err(|err| lookup_error(&err, &url, timeout))?;

        let payload: ReverseResponse = response
            .json()
            .await
            .map_err(|err| lookup_error(&err, &url, timeout))?;

        let name = payload.into_display_name();
        debug!(
            "nominatim resolved ({}, {}) to {name:?}",
            location.y, location.x
        );
        Ok(name)
    }
}
