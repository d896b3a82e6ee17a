mod challenge;
mod session;

pub use challenge::{ConfirmOutcome, PendingChallenge, Subject, VerificationToken};
pub use session::{AuthState, Session};
