use thiserror::Error;
use waitlist_types::ErrorCode;

/// SDK-specific errors.
#[derive(Debug, Error)]
pub enum WaitlistSdkError {
    /// API returned a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    /// Network error (only with `client` feature)
    #[cfg(feature = "client")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Local cache could not be read or written
    #[error("Cache I/O error: {0}")]
    Cache(#[from] std::io::Error),

    /// Cached or received payload was not valid JSON
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
