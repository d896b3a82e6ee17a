use tracing::{debug, warn};

use super::commands::ProfileCommand;
use super::events::ProfileEvent;
use super::models::{ProfileRecord, RemoteProfile};
use crate::common::{is_email_valid, phone_log_tag};
use crate::kernel::Machine;

/// Profile machine - reduces profile events into the visible record
///
/// Merge rule:
/// - the phone comes from `SessionAuthenticated` only
/// - name and email come from `ProfileFetched`
/// - a fetch keyed to another phone than the session's is stale and dropped
/// - a fetch that lands before the session is held until the session arrives
/// - the record exists once both halves are known, and later fetches never
///   overwrite it (local edits win)
#[derive(Debug)]
pub struct ProfileMachine {
    subject_phone: Option<String>,
    held_fetch: Option<(String, RemoteProfile)>,
    fetch_failed: bool,
    record: Option<ProfileRecord>,
    saved: Option<ProfileRecord>,
    email_valid: bool,
}

impl Default for ProfileMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileMachine {
    pub fn new() -> Self {
        Self {
            subject_phone: None,
            held_fetch: None,
            fetch_failed: false,
            record: None,
            saved: None,
            // Nothing typed yet counts as valid.
            email_valid: true,
        }
    }

    pub fn subject_phone(&self) -> Option<&str> {
        self.subject_phone.as_deref()
    }

    /// The visible (possibly edited) record.
    pub fn record(&self) -> Option<&ProfileRecord> {
        self.record.as_ref()
    }

    /// The record as last known to the store.
    pub fn saved(&self) -> Option<&ProfileRecord> {
        self.saved.as_ref()
    }

    pub fn fetch_failed(&self) -> bool {
        self.fetch_failed
    }

    /// Result of the most recent email validation.
    pub fn is_email_valid(&self) -> bool {
        self.email_valid
    }

    pub fn can_save(&self) -> bool {
        self.record.is_some() && self.email_valid
    }

    /// True when the visible record differs from the stored one.
    pub fn is_dirty(&self) -> bool {
        self.record.is_some() && self.record != self.saved
    }

    fn merge(&mut self, phone_number: &str, profile: RemoteProfile) {
        if self.record.is_some() {
            debug!("Profile already loaded, keeping local state");
            return;
        }
        let record = ProfileRecord::from_remote(phone_number, profile);
        self.saved = Some(record.clone());
        self.record = Some(record);
        self.fetch_failed = false;
    }
}

impl Machine for ProfileMachine {
    type Event = ProfileEvent;
    type Command = ProfileCommand;

    fn decide(&mut self, event: &ProfileEvent) -> Option<ProfileCommand> {
        match event {
            ProfileEvent::SessionAuthenticated { phone_number } => {
                if self.subject_phone.is_some() {
                    warn!("Session already known, ignoring repeated authentication");
                    return None;
                }
                self.subject_phone = Some(phone_number.clone());

                match self.held_fetch.take() {
                    Some((fetched_for, profile)) if fetched_for == *phone_number => {
                        self.merge(phone_number, profile);
                        None
                    }
                    Some((fetched_for, _)) => {
                        warn!(
                            held = %phone_log_tag(&fetched_for),
                            "Dropping early fetch for another phone"
                        );
                        Some(ProfileCommand::Fetch {
                            phone_number: phone_number.clone(),
                        })
                    }
                    None => Some(ProfileCommand::Fetch {
                        phone_number: phone_number.clone(),
                    }),
                }
            }

            ProfileEvent::ProfileFetched {
                phone_number,
                profile,
            } => {
                match self.subject_phone.clone() {
                    Some(subject) if subject == *phone_number => {
                        self.merge(&subject, profile.clone());
                    }
                    Some(_) => {
                        warn!(
                            fetched = %phone_log_tag(phone_number),
                            "Dropping stale fetch for another phone"
                        );
                    }
                    None => {
                        self.held_fetch = Some((phone_number.clone(), profile.clone()));
                    }
                }
                None
            }

            ProfileEvent::ProfileFetchFailed { phone_number } => {
                if self.subject_phone.as_deref() == Some(phone_number.as_str())
                    && self.record.is_none()
                {
                    self.fetch_failed = true;
                }
                None
            }

            ProfileEvent::NameEdited { name } => {
                match self.record.as_mut() {
                    Some(record) => record.name = Some(name.clone()),
                    None => warn!("Name edited before a profile was loaded"),
                }
                None
            }

            ProfileEvent::EmailEdited { email } => {
                self.email_valid = is_email_valid(email);
                match self.record.as_mut() {
                    Some(record) => record.email = Some(email.clone()),
                    None => warn!("Email edited before a profile was loaded"),
                }
                None
            }

            ProfileEvent::ProfileSaved { record } => {
                // The store now holds the normalized values; show those.
                self.record = Some(record.clone());
                self.saved = Some(record.clone());
                None
            }
        }
    }
}
