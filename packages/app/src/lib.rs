// Kwitter - phone sign-in and contact profile core
//
// Two domains (session, profile) reduce events into state; the kernel wires
// them to the identity provider and profile store through traits.

pub mod cli;
pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
