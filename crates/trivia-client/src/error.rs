//! Trivia API client error types.

/// Errors from trivia API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The API returned a non-2xx status.
    #[error("trivia API {endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The base URL could not be parsed or joined.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
