//! App dependencies for controllers (using traits for testability)
//!
//! Adapters here wrap the concrete REST clients so the domain only sees the
//! `Base*` traits.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use firebase_auth::FirebaseAuthService;
use profile_client::{ProfileApiClient, UpdateUserInfoRequest};
use std::sync::Arc;
use tracing::debug;

use crate::domains::profile::models::{ProfileRecord, RemoteProfile};
use crate::domains::session::models::{ConfirmOutcome, Subject, VerificationToken};
use crate::kernel::{BaseIdentityProvider, BaseProfileStore, BaseVerificationGate};

// =============================================================================
// FirebaseAuthService Adapter (implements BaseIdentityProvider trait)
// =============================================================================

/// Wrapper around FirebaseAuthService that implements BaseIdentityProvider
pub struct FirebaseAuthAdapter(pub Arc<FirebaseAuthService>);

impl FirebaseAuthAdapter {
    pub fn new(service: Arc<FirebaseAuthService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseIdentityProvider for FirebaseAuthAdapter {
    async fn issue_challenge(
        &self,
        phone_number: &str,
        verification: &VerificationToken,
    ) -> Result<String> {
        self.0
            .send_verification_code(phone_number, verification.as_str())
            .await
            .map(|pending| pending.session_info)
            .context("Identity provider did not issue a challenge")
    }

    async fn confirm(&self, handle: &str, code: &str) -> Result<ConfirmOutcome> {
        match self.0.sign_in_with_phone_number(handle, code).await {
            Ok(user) => {
                debug!(is_new_user = user.is_new_user, "Phone sign-in accepted");
                Ok(ConfirmOutcome::Confirmed(Subject {
                    phone_number: user.phone_number,
                    user_id: user.local_id,
                    id_token: user.id_token,
                }))
            }
            Err(e) if e.is_invalid_code() => Ok(ConfirmOutcome::InvalidCode),
            Err(e) if e.is_session_expired() => Ok(ConfirmOutcome::Expired),
            Err(e) => Err(anyhow::Error::from(e)
                .context("Identity provider could not confirm the code")),
        }
    }
}

// =============================================================================
// ProfileApiClient Adapter (implements BaseProfileStore trait)
// =============================================================================

/// Wrapper around ProfileApiClient that implements BaseProfileStore
pub struct ProfileApiAdapter(pub Arc<ProfileApiClient>);

impl ProfileApiAdapter {
    pub fn new(client: Arc<ProfileApiClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseProfileStore for ProfileApiAdapter {
    async fn fetch(&self, phone_number: &str) -> Result<RemoteProfile> {
        // The store's own copy of the phone is ignored; the session owns it.
        self.0
            .get_user_info(phone_number)
            .await
            .map(|info| RemoteProfile {
                name: info.name,
                email: info.email,
            })
            .context("Profile store fetch failed")
    }

    async fn update(&self, record: &ProfileRecord) -> Result<()> {
        let request = UpdateUserInfoRequest {
            phone: record.phone.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
        };

        let ack = self
            .0
            .update_user_info(&request)
            .await
            .context("Profile store update failed")?;
        debug!(%ack, "Profile store acknowledged update");
        Ok(())
    }
}

// =============================================================================
// Static Verification Gate
// =============================================================================

/// Gate that hands out one pre-obtained token on every `resolve()`.
///
/// Real verification tokens are single use, so this only works against the
/// auth emulator or with test phone numbers that skip verification.
/// Interactive runs use the prompting gate instead.
pub struct StaticVerificationGate {
    token: String,
}

impl StaticVerificationGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl BaseVerificationGate for StaticVerificationGate {
    async fn resolve(&self) -> Result<VerificationToken> {
        if self.token.trim().is_empty() {
            return Err(anyhow!("no verification token configured"));
        }
        Ok(VerificationToken::new(self.token.clone()))
    }
}

// =============================================================================
// AppDeps
// =============================================================================

/// App dependencies accessible to controllers (using traits for testability)
#[derive(Clone)]
pub struct AppDeps {
    pub identity: Arc<dyn BaseIdentityProvider>,
    pub gate: Arc<dyn BaseVerificationGate>,
    pub profile_store: Arc<dyn BaseProfileStore>,
    /// Lifetime of an issued code challenge
    pub challenge_ttl: chrono::Duration,
}

impl AppDeps {
    pub fn new(
        identity: Arc<dyn BaseIdentityProvider>,
        gate: Arc<dyn BaseVerificationGate>,
        profile_store: Arc<dyn BaseProfileStore>,
        challenge_ttl: chrono::Duration,
    ) -> Self {
        Self {
            identity,
            gate,
            profile_store,
            challenge_ttl,
        }
    }
}
