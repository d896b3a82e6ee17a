//! Profile domain - the signed-in subject's contact record
//!
//! Responsibilities:
//! - Fetching the record once the session is authenticated
//! - Local edits of name and email, gated by email validation
//! - Submitting the full record back to the store
//!
//! Profile state is a reducer over `ProfileEvent`s, so the order in which
//! the session handoff and the fetch complete cannot corrupt it.

pub mod commands;
pub mod controller;
pub mod error;
pub mod events;
pub mod machines;
pub mod models;

pub use commands::ProfileCommand;
pub use controller::ProfileController;
pub use error::ProfileError;
pub use events::ProfileEvent;
pub use machines::ProfileMachine;
pub use models::{ProfileRecord, RemoteProfile};
