use super::models::{PendingChallenge, Subject};

/// Session events - facts about authentication progress
///
/// Failures are not events. They go in `Result::Err` and leave the state
/// where it was.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The provider issued a code challenge
    ChallengeIssued { challenge: PendingChallenge },

    /// The provider accepted the code for the pending challenge
    Authenticated { subject: Subject },
}
