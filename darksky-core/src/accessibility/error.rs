use std::time::Duration;

use thiserror::Error;

/// Errors from [`crate::FeatureLookup::query`] and
/// [`crate::ReverseGeocoder::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The call did not complete within its deadline.
    #[error("lookup timed out after {timeout:?}")]
    Timeout {
        /// Deadline that elapsed.
        timeout: Duration,
    },
    /// The service could not be reached.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("failed to decode lookup response: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },
}
