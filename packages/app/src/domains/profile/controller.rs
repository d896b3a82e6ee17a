//! Profile controller - loads, edits and saves the subject's profile

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::commands::ProfileCommand;
use super::error::ProfileError;
use super::events::ProfileEvent;
use super::machines::ProfileMachine;
use super::models::ProfileRecord;
use crate::common::{is_email_valid, phone_log_tag};
use crate::kernel::{BaseProfileStore, Machine};

pub struct ProfileController {
    store: Arc<dyn BaseProfileStore>,
    machine: ProfileMachine,
}

impl ProfileController {
    pub fn new(store: Arc<dyn BaseProfileStore>) -> Self {
        Self {
            store,
            machine: ProfileMachine::new(),
        }
    }

    /// Read-only view of the reduced profile state.
    pub fn state(&self) -> &ProfileMachine {
        &self.machine
    }

    pub fn record(&self) -> Option<&ProfileRecord> {
        self.machine.record()
    }

    pub fn can_save(&self) -> bool {
        self.machine.can_save()
    }

    /// Hand over the authenticated phone. Fetches the profile unless a fetch
    /// for this phone already completed.
    pub async fn on_session_authenticated(
        &mut self,
        phone_number: &str,
    ) -> Result<Option<ProfileRecord>, ProfileError> {
        let cmd = self.machine.decide(&ProfileEvent::SessionAuthenticated {
            phone_number: phone_number.to_string(),
        });

        if let Some(ProfileCommand::Fetch { phone_number }) = cmd {
            self.fetch_profile(&phone_number).await?;
        }
        Ok(self.machine.record().cloned())
    }

    /// Fetch the stored profile for `phone_number` and fold it into state.
    ///
    /// Returns the visible record when the fetch belongs to the session's
    /// phone, and `None` when the reducer held it (no session yet) or
    /// dropped it as stale. A record that was already loaded keeps its
    /// local edits and is returned as is.
    ///
    /// On failure the profile stays unset; the error is logged here and
    /// returned, never retried.
    #[instrument(skip_all, fields(phone = %phone_log_tag(phone_number)))]
    pub async fn fetch_profile(
        &mut self,
        phone_number: &str,
    ) -> Result<Option<ProfileRecord>, ProfileError> {
        match self.store.fetch(phone_number).await {
            Ok(profile) => {
                self.machine.decide(&ProfileEvent::ProfileFetched {
                    phone_number: phone_number.to_string(),
                    profile,
                });
                let merged = self
                    .machine
                    .record()
                    .filter(|record| record.phone == phone_number)
                    .cloned();
                if merged.is_some() {
                    info!("Profile loaded");
                } else {
                    debug!("Fetched profile not applied to the session");
                }
                Ok(merged)
            }
            Err(e) => {
                error!("Failed to fetch profile: {:#}", e);
                self.machine.decide(&ProfileEvent::ProfileFetchFailed {
                    phone_number: phone_number.to_string(),
                });
                Err(ProfileError::ProfileFetchFailure(format!("{:#}", e)))
            }
        }
    }

    /// Pure email check used to gate saving.
    pub fn validate_email(candidate: &str) -> bool {
        is_email_valid(candidate)
    }

    pub fn edit_name(&mut self, name: &str) {
        self.machine.decide(&ProfileEvent::NameEdited {
            name: name.to_string(),
        });
    }

    /// Record the typed email and re-run validation. Returns the new result.
    pub fn edit_email(&mut self, email: &str) -> bool {
        self.machine.decide(&ProfileEvent::EmailEdited {
            email: email.to_string(),
        });
        self.machine.is_email_valid()
    }

    /// Submit the full record (session phone + edited name and email).
    ///
    /// If the store rejects it the edits stay in place so the user can try
    /// again; nothing is rolled back.
    #[instrument(skip_all)]
    pub async fn update_profile(&mut self) -> Result<ProfileRecord, ProfileError> {
        let mut record = self
            .machine
            .record()
            .cloned()
            .ok_or(ProfileError::ProfileNotLoaded)?;
        if !self.machine.is_email_valid() {
            warn!("Save blocked by invalid email");
            return Err(ProfileError::InvalidEmailFormat);
        }
        record.email = record.email.map(|email| email.trim().to_string());

        match self.store.update(&record).await {
            Ok(()) => {
                self.machine.decide(&ProfileEvent::ProfileSaved {
                    record: record.clone(),
                });
                info!(phone = %phone_log_tag(&record.phone), "Profile saved");
                Ok(record)
            }
            Err(e) => {
                error!("Failed to update profile: {:#}", e);
                Err(ProfileError::ProfileUpdateFailure(format!("{:#}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::profile::models::RemoteProfile;
    use crate::kernel::test_dependencies::MockProfileStore;
    use tokio_test::{assert_err, assert_ok};

    const PHONE: &str = "+46760000000";

    fn ann_store() -> MockProfileStore {
        MockProfileStore::new().with_profile(PHONE, Some("Ann"), Some("ann@x.com"))
    }

    #[tokio::test]
    async fn authentication_fetches_exactly_once() {
        let store = Arc::new(ann_store());
        let mut profile = ProfileController::new(store.clone());

        let loaded = assert_ok!(profile.on_session_authenticated(PHONE).await);
        assert_ok!(profile.on_session_authenticated(PHONE).await);

        assert_eq!(loaded.and_then(|r| r.name), Some("Ann".to_string()));
        assert_eq!(store.fetch_calls(), vec![PHONE.to_string()]);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_profile_unset() {
        let mut profile = ProfileController::new(Arc::new(MockProfileStore::new().failing_fetch()));

        let err = assert_err!(profile.on_session_authenticated(PHONE).await);

        assert!(matches!(err, ProfileError::ProfileFetchFailure(_)));
        assert!(profile.record().is_none());
        assert!(profile.state().fetch_failed());
        assert!(!profile.can_save());
    }

    #[tokio::test]
    async fn unknown_phone_loads_empty_profile() {
        let mut profile = ProfileController::new(Arc::new(MockProfileStore::new()));

        let loaded = assert_ok!(profile.on_session_authenticated(PHONE).await);

        assert_eq!(loaded, Some(ProfileRecord::new(PHONE)));
    }

    #[tokio::test]
    async fn invalid_email_blocks_update() {
        let store = Arc::new(ann_store());
        let mut profile = ProfileController::new(store.clone());
        assert_ok!(profile.on_session_authenticated(PHONE).await);

        assert!(!profile.edit_email("bad"));
        let err = assert_err!(profile.update_profile().await);

        assert_eq!(err, ProfileError::InvalidEmailFormat);
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn update_requires_loaded_profile() {
        let store = Arc::new(MockProfileStore::new());
        let mut profile = ProfileController::new(store.clone());

        let err = assert_err!(profile.update_profile().await);

        assert_eq!(err, ProfileError::ProfileNotLoaded);
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn update_sends_full_record() {
        let store = Arc::new(ann_store());
        let mut profile = ProfileController::new(store.clone());
        assert_ok!(profile.on_session_authenticated(PHONE).await);

        profile.edit_name("Ann Svensson");
        assert!(profile.edit_email(" ann@svensson.se "));
        let saved = assert_ok!(profile.update_profile().await);

        let expected = ProfileRecord {
            phone: PHONE.into(),
            name: Some("Ann Svensson".into()),
            email: Some("ann@svensson.se".into()),
        };
        assert_eq!(saved, expected);
        assert_eq!(store.updates(), vec![expected]);
    }

    #[tokio::test]
    async fn failed_update_keeps_typed_values() {
        let store = Arc::new(ann_store().failing_update());
        let mut profile = ProfileController::new(store.clone());
        assert_ok!(profile.on_session_authenticated(PHONE).await);

        profile.edit_name("Anna");
        let err = assert_err!(profile.update_profile().await);

        assert!(matches!(err, ProfileError::ProfileUpdateFailure(_)));
        assert_eq!(
            profile.record().and_then(|r| r.name.as_deref()),
            Some("Anna")
        );
        assert!(profile.state().is_dirty());
        assert_eq!(
            profile.state().saved().and_then(|r| r.name.as_deref()),
            Some("Ann")
        );
    }

    #[tokio::test]
    async fn fetch_for_another_phone_is_not_returned() {
        let store = Arc::new(ann_store().with_profile("+46762500502", Some("Eve"), None));
        let mut profile = ProfileController::new(store.clone());
        assert_ok!(profile.on_session_authenticated(PHONE).await);

        let fetched = assert_ok!(profile.fetch_profile("+46762500502").await);

        assert_eq!(fetched, None);
        assert_eq!(profile.record().map(|r| r.phone.as_str()), Some(PHONE));
        assert_eq!(
            profile.record().and_then(|r| r.name.as_deref()),
            Some("Ann")
        );
    }

    #[tokio::test]
    async fn fetch_before_session_is_held_not_returned() {
        let mut profile = ProfileController::new(Arc::new(ann_store()));

        assert_eq!(assert_ok!(profile.fetch_profile(PHONE).await), None);
        assert!(profile.record().is_none());

        let loaded = assert_ok!(profile.on_session_authenticated(PHONE).await);
        assert_eq!(loaded.and_then(|r| r.name), Some("Ann".to_string()));
    }

    #[tokio::test]
    async fn refetch_returns_edited_record() {
        let mut profile = ProfileController::new(Arc::new(ann_store()));
        assert_ok!(profile.on_session_authenticated(PHONE).await);
        profile.edit_name("Anna");

        let fetched = assert_ok!(profile.fetch_profile(PHONE).await);

        assert_eq!(fetched.and_then(|r| r.name), Some("Anna".to_string()));
    }

    #[test]
    fn validate_email_is_pure() {
        assert!(ProfileController::validate_email("a.b-c@example.com"));
        assert!(!ProfileController::validate_email("not-an-email"));
        assert!(!ProfileController::validate_email("a@b.toolong"));
    }

    #[test]
    fn remote_profile_ignores_store_phone() {
        let record = ProfileRecord::from_remote(
            PHONE,
            RemoteProfile {
                name: Some("Ann".into()),
                email: None,
            },
        );
        assert_eq!(record.phone, PHONE);
    }
}
