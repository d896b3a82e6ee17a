//! Session controller - drives the sign-in flow against the identity provider

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::commands::SessionCommand;
use super::error::SessionError;
use super::events::SessionEvent;
use super::machines::SessionMachine;
use super::models::{AuthState, ConfirmOutcome, PendingChallenge, Session, Subject};
use crate::common::{is_phone_number_valid, phone_log_tag};
use crate::kernel::{BaseIdentityProvider, BaseVerificationGate, Machine};

/// Default lifetime of a code challenge.
pub const DEFAULT_CHALLENGE_TTL_SECS: i64 = 300;

pub struct SessionController {
    identity: Arc<dyn BaseIdentityProvider>,
    gate: Arc<dyn BaseVerificationGate>,
    challenge_ttl: Duration,
    machine: SessionMachine,
    commands: Vec<SessionCommand>,
}

impl SessionController {
    pub fn new(identity: Arc<dyn BaseIdentityProvider>, gate: Arc<dyn BaseVerificationGate>) -> Self {
        Self {
            identity,
            gate,
            challenge_ttl: Duration::seconds(DEFAULT_CHALLENGE_TTL_SECS),
            machine: SessionMachine::new(),
            commands: Vec::new(),
        }
    }

    pub fn with_challenge_ttl(mut self, ttl: Duration) -> Self {
        self.challenge_ttl = ttl;
        self
    }

    pub fn session(&self) -> &Session {
        self.machine.session()
    }

    pub fn state(&self) -> AuthState {
        self.machine.state()
    }

    pub fn pending_challenge(&self) -> Option<&PendingChallenge> {
        self.machine.pending()
    }

    /// Commands decided since the last drain, in decision order.
    pub fn drain_commands(&mut self) -> Vec<SessionCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Request a one-time code for `phone_number`.
    ///
    /// The format check runs first and blocks the call entirely. Then the
    /// human-verification gate is resolved and the provider asked for a
    /// challenge. Any previous pending challenge is discarded on success.
    #[instrument(skip_all, fields(phone = %phone_log_tag(phone_number)))]
    pub async fn request_challenge(
        &mut self,
        phone_number: &str,
    ) -> Result<PendingChallenge, SessionError> {
        let phone_number = phone_number.trim();

        if self.state() == AuthState::Authenticated {
            return Err(SessionError::AlreadyAuthenticated);
        }
        if !is_phone_number_valid(phone_number) {
            return Err(SessionError::InvalidPhoneFormat);
        }

        let token = self.gate.resolve().await.map_err(|e| {
            error!("Human verification failed: {:#}", e);
            SessionError::HumanVerificationFailed(format!("{:#}", e))
        })?;

        let handle = self
            .identity
            .issue_challenge(phone_number, &token)
            .await
            .map_err(|e| {
                error!("Failed to issue challenge: {:#}", e);
                SessionError::ChallengeIssueFailure(format!("{:#}", e))
            })?;

        let challenge = PendingChallenge::new(
            handle,
            phone_number.to_string(),
            Utc::now(),
            self.challenge_ttl,
        );
        self.apply(SessionEvent::ChallengeIssued {
            challenge: challenge.clone(),
        });

        info!(expires_at = %challenge.expires_at(), "Challenge issued");
        Ok(challenge)
    }

    /// Confirm `code` for `challenge`.
    ///
    /// Only moves ChallengeIssued to Authenticated. On any failure the
    /// session stays where it was so the user can retry with another code.
    #[instrument(skip_all)]
    pub async fn confirm_challenge(
        &mut self,
        challenge: &PendingChallenge,
        code: &str,
    ) -> Result<Subject, SessionError> {
        if self.state() != AuthState::ChallengeIssued {
            warn!(state = %self.state(), "Code submitted without a pending challenge");
            return Err(SessionError::NoPendingChallenge);
        }

        // A handle that is no longer the owned one was discarded by a newer request.
        let current = match self.machine.pending() {
            Some(pending) if pending == challenge => pending.clone(),
            _ => return Err(SessionError::ChallengeExpired),
        };
        if current.is_expired_at(Utc::now()) {
            return Err(SessionError::ChallengeExpired);
        }

        let code = code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(SessionError::InvalidCode);
        }

        let outcome = self
            .identity
            .confirm(current.handle(), code)
            .await
            .map_err(|e| {
                error!("Failed to confirm code: {:#}", e);
                SessionError::ConfirmFailure(format!("{:#}", e))
            })?;

        match outcome {
            ConfirmOutcome::Confirmed(subject) => {
                self.apply(SessionEvent::Authenticated {
                    subject: subject.clone(),
                });
                info!(phone = %phone_log_tag(&subject.phone_number), "Signed in");
                Ok(subject)
            }
            ConfirmOutcome::InvalidCode => {
                error!("Code rejected by identity provider");
                Err(SessionError::InvalidCode)
            }
            ConfirmOutcome::Expired => {
                error!("Challenge expired at identity provider");
                Err(SessionError::ChallengeExpired)
            }
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        if let Some(cmd) = self.machine.decide(&event) {
            self.commands.push(cmd);
        }
    }
}
