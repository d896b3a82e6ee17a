//! Error types for the profile API client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfileApiError>;

#[derive(Debug, Error)]
pub enum ProfileApiError {
    /// Base URL missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed or timed out
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Profile API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}
