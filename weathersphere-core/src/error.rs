use thiserror::Error;

/// Everything that can go wrong while fetching weather for a city.
///
/// `Api` is the provider saying no; the other variants are transport-level
/// problems (network, malformed payloads) or a query rejected before any
/// request was made.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Weather provider rejected the request ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Failed to reach the weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse weather provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("City name must not be empty")]
    InvalidQuery,
}

impl FetchError {
    /// True when the provider answered with a non-success status code.
    pub fn is_api(&self) -> bool {
        matches!(self, FetchError::Api { .. })
    }

    /// True for network and parse failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Decode(_))
    }
}
