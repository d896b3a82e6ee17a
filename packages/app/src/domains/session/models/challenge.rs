use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Proof that the human-verification gate was passed.
///
/// Single use: one token accompanies one challenge request.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationToken(..)")
    }
}

/// An outstanding code challenge for one phone number.
///
/// `handle` is opaque and only meaningful to the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingChallenge {
    handle: String,
    phone_number: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl PendingChallenge {
    /// A TTL that would run past the end of the calendar saturates to
    /// the latest representable instant.
    pub fn new(handle: String, phone_number: String, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            handle,
            phone_number,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for PendingChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingChallenge")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// The authenticated identity returned by a successful confirmation.
#[derive(Clone, PartialEq, Eq)]
pub struct Subject {
    pub phone_number: String,
    pub user_id: String,
    pub id_token: String,
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Provider verdict on a submitted code. Transport failures are errors,
/// not outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed(Subject),
    InvalidCode,
    Expired,
}
