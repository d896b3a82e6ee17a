//! Client-side format checks.
//!
//! Both checks trim the input first. Word characters are ASCII only
//! (`[0-9A-Za-z_]`), so non-Latin letters are rejected.

use regex::Regex;
use std::sync::LazyLock;

static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("phone pattern compiles")
});

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9A-Za-z_]+([.-]?[0-9A-Za-z_]+)*@[0-9A-Za-z_]+([.-]?[0-9A-Za-z_]+)*(\.[0-9A-Za-z_]{2,3})+$",
    )
    .expect("email pattern compiles")
});

/// Phone numbers accepted before a code is requested, e.g. `+46760000000`
/// or `(555) 123-4567`.
pub fn is_phone_number_valid(phone_number: &str) -> bool {
    RE_PHONE.is_match(phone_number.trim())
}

/// Emails accepted by the profile form. The TLD must be 2 or 3 characters.
pub fn is_email_valid(email: &str) -> bool {
    RE_EMAIL.is_match(email.trim())
}
