//! Error types for the Identity Toolkit client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FirebaseAuthError>;

#[derive(Debug, Error)]
pub enum FirebaseAuthError {
    /// Connection failed or timed out. The request URL is stripped since
    /// it carries the API key.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-2xx response. `message` is the API error code when the body
    /// carried one (e.g. `INVALID_CODE`), otherwise the raw body.
    #[error("Identity Toolkit error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FirebaseAuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

impl FirebaseAuthError {
    /// Error code reported by the API, if any.
    ///
    /// Codes can carry a detail suffix (`TOO_MANY_ATTEMPTS_TRY_LATER : ...`),
    /// only the leading token is returned.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.split_whitespace().next(),
            _ => None,
        }
    }

    pub fn is_invalid_code(&self) -> bool {
        matches!(self.api_code(), Some("INVALID_CODE") | Some("MISSING_CODE"))
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(
            self.api_code(),
            Some("SESSION_EXPIRED") | Some("INVALID_SESSION_INFO") | Some("CODE_EXPIRED")
        )
    }
}
