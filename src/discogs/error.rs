//! Error type for the Discogs client.

/// Errors that can occur while talking to the Discogs API.
#[derive(Debug, thiserror::Error)]
pub enum DiscogsError {
    /// Request URL could not be built from the given parameters
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// Response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Transport failure, timeout, or non-success HTTP status
    #[error("network error: {0}")]
    Network(String),

    /// No access token from the call argument or the client configuration
    #[error("no Discogs access token configured")]
    MissingToken,
}
