use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Client-side check; the store was not called
    #[error("input is not valid")]
    InvalidEmailFormat,

    #[error("no profile is loaded")]
    ProfileNotLoaded,

    #[error("could not load profile: {0}")]
    ProfileFetchFailure(String),

    #[error("could not save profile: {0}")]
    ProfileUpdateFailure(String),
}

impl ProfileError {
    /// Errors raised before any remote call was made.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ProfileError::InvalidEmailFormat | ProfileError::ProfileNotLoaded
        )
    }
}
