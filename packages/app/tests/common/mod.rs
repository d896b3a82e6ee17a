// Common test utilities

pub mod harness;
pub mod log_capture;

pub use harness::*;
pub use log_capture::*;
