// Common utilities shared across the application

pub mod identifiers;
pub mod validation;

pub use identifiers::{hash_phone_number, phone_log_tag};
pub use validation::{is_email_valid, is_phone_number_valid};
