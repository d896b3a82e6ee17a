use serde::Serialize;
use std::fmt;

/// Where the sign-in flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    ChallengeIssued,
    Authenticated,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::ChallengeIssued => "challenge issued",
            AuthState::Authenticated => "authenticated",
        };
        f.write_str(label)
    }
}

/// In-memory session. Never persisted.
///
/// `subject_phone` is set exactly when `state` is `Authenticated`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub state: AuthState,
    pub subject_phone: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }
}
