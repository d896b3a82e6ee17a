use super::models::{ProfileRecord, RemoteProfile};

/// Profile events, applied in the order they complete
#[derive(Debug, Clone)]
pub enum ProfileEvent {
    /// The session reached Authenticated for this phone
    SessionAuthenticated { phone_number: String },

    /// A fetch keyed by `phone_number` completed
    ProfileFetched {
        phone_number: String,
        profile: RemoteProfile,
    },

    /// A fetch keyed by `phone_number` failed
    ProfileFetchFailed { phone_number: String },

    NameEdited { name: String },

    EmailEdited { email: String },

    /// The store accepted `record`
    ProfileSaved { record: ProfileRecord },
}
