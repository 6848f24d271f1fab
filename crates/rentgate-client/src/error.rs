//! Client-side error types for entitlement verification.

/// Errors from verification calls against the Rentgate API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connection failure, timeout).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The API returned a non-2xx status.
    #[error("Rentgate API {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Client construction or configuration failed.
    #[error("configuration error: {0}")]
    Config(String),
}
