use tracing::warn;

use super::commands::SessionCommand;
use super::events::SessionEvent;
use super::models::{AuthState, PendingChallenge, Session};
use crate::kernel::Machine;

/// Session machine - owns the session and the pending challenge
///
/// Transitions:
/// - `ChallengeIssued` from Unauthenticated or ChallengeIssued replaces the
///   pending challenge.
/// - `Authenticated` only from ChallengeIssued. It records the subject phone,
///   drops the pending challenge and decides `LoadProfile`.
///
/// Anything else is ignored.
#[derive(Debug, Default)]
pub struct SessionMachine {
    session: Session,
    pending: Option<PendingChallenge>,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> AuthState {
        self.session.state
    }

    pub fn pending(&self) -> Option<&PendingChallenge> {
        self.pending.as_ref()
    }
}

impl Machine for SessionMachine {
    type Event = SessionEvent;
    type Command = SessionCommand;

    fn decide(&mut self, event: &SessionEvent) -> Option<SessionCommand> {
        match (self.session.state, event) {
            (
                AuthState::Unauthenticated | AuthState::ChallengeIssued,
                SessionEvent::ChallengeIssued { challenge },
            ) => {
                self.pending = Some(challenge.clone());
                self.session.state = AuthState::ChallengeIssued;
                None
            }
            (AuthState::ChallengeIssued, SessionEvent::Authenticated { subject }) => {
                self.pending = None;
                self.session.state = AuthState::Authenticated;
                self.session.subject_phone = Some(subject.phone_number.clone());
                Some(SessionCommand::LoadProfile {
                    phone_number: subject.phone_number.clone(),
                })
            }
            (state, event) => {
                warn!(%state, ?event, "Ignoring session event not valid in current state");
                None
            }
        }
    }
}
