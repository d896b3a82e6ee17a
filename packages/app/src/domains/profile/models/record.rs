use serde::{Deserialize, Serialize};

/// Profile of the signed-in subject, keyed by phone.
///
/// `phone` always comes from the session, never from the form or the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl ProfileRecord {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// Combine the session phone with the fields the store returned.
    pub fn from_remote(phone: impl Into<String>, remote: RemoteProfile) -> Self {
        Self {
            phone: phone.into(),
            name: remote.name,
            email: remote.email,
        }
    }
}

/// The editable fields as held by the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}
