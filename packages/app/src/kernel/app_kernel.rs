// AppKernel - wires the session and profile controllers together
//
// The session controller decides `LoadProfile` when sign-in completes; the
// kernel routes that command to the profile controller. Nothing else
// crosses between the two domains.

use tracing::debug;

use super::AppDeps;
use crate::domains::profile::{ProfileController, ProfileError, ProfileRecord};
use crate::domains::session::{
    AuthState, PendingChallenge, SessionCommand, SessionController, SessionError, Subject,
};

/// AppKernel owns one session and the profile bound to it
pub struct AppKernel {
    session: SessionController,
    profile: ProfileController,
}

impl AppKernel {
    /// Creates a new AppKernel with the given dependencies
    pub fn new(deps: AppDeps) -> Self {
        Self {
            session: SessionController::new(deps.identity, deps.gate)
                .with_challenge_ttl(deps.challenge_ttl),
            profile: ProfileController::new(deps.profile_store),
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn profile(&self) -> &ProfileController {
        &self.profile
    }

    pub fn auth_state(&self) -> AuthState {
        self.session.state()
    }

    pub async fn request_code(&mut self, phone_number: &str) -> Result<PendingChallenge, SessionError> {
        self.session.request_challenge(phone_number).await
    }

    /// Confirm `code` and, once signed in, load the subject's profile.
    ///
    /// A failed profile load does not undo the sign-in: the profile stays
    /// unset and the failure has already been logged by the profile
    /// controller.
    pub async fn confirm_code(
        &mut self,
        challenge: &PendingChallenge,
        code: &str,
    ) -> Result<Subject, SessionError> {
        let subject = self.session.confirm_challenge(challenge, code).await?;
        self.run_session_commands().await;
        Ok(subject)
    }

    async fn run_session_commands(&mut self) {
        for cmd in self.session.drain_commands() {
            match cmd {
                SessionCommand::LoadProfile { phone_number } => {
                    if let Err(e) = self.profile.on_session_authenticated(&phone_number).await {
                        debug!(error = %e, "Profile left unset after sign-in");
                    }
                }
            }
        }
    }

    pub fn edit_name(&mut self, name: &str) {
        self.profile.edit_name(name);
    }

    pub fn edit_email(&mut self, email: &str) -> bool {
        self.profile.edit_email(email)
    }

    pub async fn save_profile(&mut self) -> Result<ProfileRecord, ProfileError> {
        self.profile.update_profile().await
    }
}
