//! Helpers shared by the HTTP collaborators.

use std::time::Duration;

use darksky_core::LookupError;
use reqwest::Client;
use url::Url;

use crate::ProviderBuildError;

/// Build a client with the given identity and overall deadline.
pub(crate) fn build_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<Client, ProviderBuildError> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(ProviderBuildError::HttpClient)
}

/// Parse `base` and append `endpoint` to its path.
pub(crate) fn endpoint_url(base: &str, endpoint: &str) -> Result<Url, ProviderBuildError> {
    let invalid = |source| ProviderBuildError::InvalidUrl {
        url: base.to_owned(),
        source,
    };
    let mut root = Url::parse(base).map_err(invalid)?;
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    root.join(endpoint).map_err(invalid)
}

/// Map a transport or status failure onto a [`LookupError`].
pub(crate) fn lookup_error(error: &reqwest::Error, url: &Url, timeout: Duration) -> LookupError {
    if error.is_timeout() {
        return LookupError::Timeout { timeout };
    }
    if let Some(status) = error.status() {
        return LookupError::Http {
            url: url.to_string(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }
    if error.is_decode() {
        return LookupError::Decode {
            message: error.to_string(),
        };
    }
    LookupError::Network {
        url: url.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://overpass-api.de/api", "interpreter", "https://overpass-api.de/api/interpreter")]
    #[case("https://overpass-api.de/api/", "interpreter", "https://overpass-api.de/api/interpreter")]
    #[case("http://127.0.0.1:8080", "reverse", "http://127.0.0.1:8080/reverse")]
    fn endpoint_is_appended_to_base_path(
        #[case] base: &str,
        #[case] endpoint: &str,
        #[case] expected: &str,
    ) {
        let url = endpoint_url(base, endpoint).expect("valid URL");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn unparsable_base_is_rejected() {
        let err = endpoint_url("not a url", "reverse").expect_err("invalid URL");
        assert!(matches!(err, ProviderBuildError::InvalidUrl { .. }));
    }
}
