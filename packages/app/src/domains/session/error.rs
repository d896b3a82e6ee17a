use thiserror::Error;

/// Why a session operation did not move the session forward.
///
/// None of these change the session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Client-side check; the provider was not called
    #[error("phone number is not in a valid format (example: +46760000000)")]
    InvalidPhoneFormat,

    #[error("human verification failed: {0}")]
    HumanVerificationFailed(String),

    #[error("could not send a code: {0}")]
    ChallengeIssueFailure(String),

    #[error("already signed in")]
    AlreadyAuthenticated,

    #[error("no code has been requested")]
    NoPendingChallenge,

    #[error("the code is not valid")]
    InvalidCode,

    #[error("the code has expired, request a new one")]
    ChallengeExpired,

    #[error("could not verify the code: {0}")]
    ConfirmFailure(String),
}

impl SessionError {
    /// Errors raised before any remote call was made.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidPhoneFormat
                | SessionError::AlreadyAuthenticated
                | SessionError::NoPendingChallenge
        )
    }
}
