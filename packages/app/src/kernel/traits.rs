// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// State transitions and validation live in the domain controllers that use them.
//
// Naming convention: Base* for trait names (e.g., BaseIdentityProvider)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::profile::models::{ProfileRecord, RemoteProfile};
use crate::domains::session::models::{ConfirmOutcome, VerificationToken};

// =============================================================================
// Identity Provider Trait (Infrastructure - phone sign-in)
// =============================================================================

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// Send a one-time code to `phone_number`.
    ///
    /// Returns the provider's opaque handle for the outstanding challenge.
    async fn issue_challenge(
        &self,
        phone_number: &str,
        verification: &VerificationToken,
    ) -> Result<String>;

    /// Check `code` against the challenge identified by `handle`.
    ///
    /// A rejected code is an `Ok` outcome; `Err` means the provider could
    /// not be asked.
    async fn confirm(&self, handle: &str, code: &str) -> Result<ConfirmOutcome>;
}

// =============================================================================
// Human Verification Gate Trait (Infrastructure - anti-automation)
// =============================================================================

#[async_trait]
pub trait BaseVerificationGate: Send + Sync {
    /// Resolve the gate once, yielding a single-use token.
    async fn resolve(&self) -> Result<VerificationToken>;
}

// =============================================================================
// Profile Store Trait (Infrastructure - remote profile records)
// =============================================================================

#[async_trait]
pub trait BaseProfileStore: Send + Sync {
    /// Look up the stored profile keyed by `phone_number`.
    async fn fetch(&self, phone_number: &str) -> Result<RemoteProfile>;

    /// Replace the stored profile with `record`.
    async fn update(&self, record: &ProfileRecord) -> Result<()>;
}
