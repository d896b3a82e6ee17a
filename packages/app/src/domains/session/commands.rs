/// Session commands - work the session hands to the rest of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Load the profile of the freshly authenticated subject.
    LoadProfile { phone_number: String },
}
