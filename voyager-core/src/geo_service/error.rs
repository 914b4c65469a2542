use thiserror::Error;

/// Errors from [`crate::geo_service::GeoService`] calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    /// No API key was configured for a service that requires one.
    #[error("geo service API key is not configured")]
    MissingApiKey,

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with status {status}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The request failed before a response was received.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Underlying error description.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse geo service response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },

    /// The service reported a logical error in an otherwise valid response.
    #[error("geo service error: {message}")]
    ServiceError {
        /// Service-provided description.
        message: String,
    },
}
