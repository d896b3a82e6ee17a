//! Session domain - phone-number sign-in via one-time code
//!
//! Unauthenticated --request_challenge--> ChallengeIssued --confirm_challenge--> Authenticated
//!
//! Responsibilities:
//! - Client-side phone format check
//! - Human-verification gate before a code is requested
//! - Owning the pending challenge and the authenticated subject

pub mod commands;
pub mod controller;
pub mod error;
pub mod events;
pub mod machines;
pub mod models;

pub use commands::SessionCommand;
pub use controller::SessionController;
pub use error::SessionError;
pub use events::SessionEvent;
pub use machines::SessionMachine;
pub use models::{AuthState, ConfirmOutcome, PendingChallenge, Session, Subject, VerificationToken};
