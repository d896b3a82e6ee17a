// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into AppKernel for tests.
// Every mock records its calls so tests can assert on what reached the
// "remote" side.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{AppDeps, BaseIdentityProvider, BaseProfileStore, BaseVerificationGate};
use crate::domains::profile::models::{ProfileRecord, RemoteProfile};
use crate::domains::session::models::{ConfirmOutcome, Subject, VerificationToken};

// =============================================================================
// Mock Identity Provider
// =============================================================================

/// Issues `session-1`, `session-2`, ... and accepts one code for any of them.
pub struct MockIdentityProvider {
    accepted_code: String,
    fail_issue: bool,
    fail_confirm: bool,
    expire_on_confirm: bool,
    issued: AtomicUsize,
    issue_calls: Arc<Mutex<Vec<(String, String)>>>,
    confirm_calls: Arc<Mutex<Vec<(String, String)>>>,
    handle_phones: Arc<Mutex<HashMap<String, String>>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            accepted_code: "123456".to_string(),
            fail_issue: false,
            fail_confirm: false,
            expire_on_confirm: false,
            issued: AtomicUsize::new(0),
            issue_calls: Arc::new(Mutex::new(Vec::new())),
            confirm_calls: Arc::new(Mutex::new(Vec::new())),
            handle_phones: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Accept `code` instead of the default `123456`
    pub fn with_code(mut self, code: &str) -> Self {
        self.accepted_code = code.to_string();
        self
    }

    /// Fail every challenge request as if the provider were unreachable
    pub fn failing_issue(mut self) -> Self {
        self.fail_issue = true;
        self
    }

    /// Fail every confirmation as if the provider were unreachable
    pub fn failing_confirm(mut self) -> Self {
        self.fail_confirm = true;
        self
    }

    /// Report every challenge as expired on confirmation
    pub fn expiring(mut self) -> Self {
        self.expire_on_confirm = true;
        self
    }

    /// (phone, verification token) for every challenge request
    pub fn issued_to(&self) -> Vec<(String, String)> {
        self.issue_calls.lock().unwrap().clone()
    }

    /// (handle, code) for every confirmation that reached the provider
    pub fn confirmed_codes(&self) -> Vec<(String, String)> {
        self.confirm_calls.lock().unwrap().clone()
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    async fn issue_challenge(
        &self,
        phone_number: &str,
        verification: &VerificationToken,
    ) -> Result<String> {
        self.issue_calls
            .lock()
            .unwrap()
            .push((phone_number.to_string(), verification.as_str().to_string()));

        if self.fail_issue {
            return Err(anyhow!("mock provider unavailable"));
        }

        let handle = format!("session-{}", self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        self.handle_phones
            .lock()
            .unwrap()
            .insert(handle.clone(), phone_number.to_string());
        Ok(handle)
    }

    async fn confirm(&self, handle: &str, code: &str) -> Result<ConfirmOutcome> {
        self.confirm_calls
            .lock()
            .unwrap()
            .push((handle.to_string(), code.to_string()));

        if self.fail_confirm {
            return Err(anyhow!("mock provider unavailable"));
        }
        if self.expire_on_confirm {
            return Ok(ConfirmOutcome::Expired);
        }
        if code != self.accepted_code {
            return Ok(ConfirmOutcome::InvalidCode);
        }

        let Some(phone_number) = self.handle_phones.lock().unwrap().get(handle).cloned() else {
            return Ok(ConfirmOutcome::Expired);
        };

        Ok(ConfirmOutcome::Confirmed(Subject {
            user_id: format!("uid-{handle}"),
            id_token: format!("id-token-{handle}"),
            phone_number,
        }))
    }
}

// =============================================================================
// Mock Verification Gate
// =============================================================================

pub struct MockVerificationGate {
    token: Option<String>,
    resolved: AtomicUsize,
}

impl MockVerificationGate {
    pub fn new() -> Self {
        Self::with_token("test-verification-token")
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            resolved: AtomicUsize::new(0),
        }
    }

    /// A gate the user never gets past
    pub fn failing() -> Self {
        Self {
            token: None,
            resolved: AtomicUsize::new(0),
        }
    }

    pub fn resolve_count(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }
}

impl Default for MockVerificationGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseVerificationGate for MockVerificationGate {
    async fn resolve(&self) -> Result<VerificationToken> {
        self.resolved.fetch_add(1, Ordering::SeqCst);
        self.token
            .as_deref()
            .map(VerificationToken::new)
            .ok_or_else(|| anyhow!("verification challenge not solved"))
    }
}

// =============================================================================
// Mock Profile Store
// =============================================================================

pub struct MockProfileStore {
    profiles: Arc<Mutex<HashMap<String, RemoteProfile>>>,
    fail_fetch: bool,
    fail_update: bool,
    fetch_calls: Arc<Mutex<Vec<String>>>,
    updates: Arc<Mutex<Vec<ProfileRecord>>>,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(Mutex::new(HashMap::new())),
            fail_fetch: false,
            fail_update: false,
            fetch_calls: Arc::new(Mutex::new(Vec::new())),
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_profile(self, phone: &str, name: Option<&str>, email: Option<&str>) -> Self {
        self.profiles.lock().unwrap().insert(
            phone.to_string(),
            RemoteProfile {
                name: name.map(str::to_string),
                email: email.map(str::to_string),
            },
        );
        self
    }

    /// Reject every fetch (simulated network error)
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Reject every update (simulated network error)
    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    /// Phones passed to `fetch`, in call order
    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }

    /// Records passed to `update`, in call order
    pub fn updates(&self) -> Vec<ProfileRecord> {
        self.updates.lock().unwrap().clone()
    }

    pub fn stored(&self, phone: &str) -> Option<RemoteProfile> {
        self.profiles.lock().unwrap().get(phone).cloned()
    }
}

impl Default for MockProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseProfileStore for MockProfileStore {
    async fn fetch(&self, phone_number: &str) -> Result<RemoteProfile> {
        self.fetch_calls
            .lock()
            .unwrap()
            .push(phone_number.to_string());

        if self.fail_fetch {
            return Err(anyhow!("simulated network error"));
        }

        Ok(self
            .profiles
            .lock()
            .unwrap()
            .get(phone_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn update(&self, record: &ProfileRecord) -> Result<()> {
        self.updates.lock().unwrap().push(record.clone());

        if self.fail_update {
            return Err(anyhow!("simulated network error"));
        }

        self.profiles.lock().unwrap().insert(
            record.phone.clone(),
            RemoteProfile {
                name: record.name.clone(),
                email: record.email.clone(),
            },
        );
        Ok(())
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub identity: Arc<MockIdentityProvider>,
    pub gate: Arc<MockVerificationGate>,
    pub profile_store: Arc<MockProfileStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            identity: Arc::new(MockIdentityProvider::new()),
            gate: Arc::new(MockVerificationGate::new()),
            profile_store: Arc::new(MockProfileStore::new()),
        }
    }

    /// Set a mock identity provider
    pub fn mock_identity(mut self, identity: MockIdentityProvider) -> Self {
        self.identity = Arc::new(identity);
        self
    }

    /// Set a mock verification gate
    pub fn mock_gate(mut self, gate: MockVerificationGate) -> Self {
        self.gate = Arc::new(gate);
        self
    }

    /// Set a mock profile store
    pub fn mock_profile_store(mut self, store: MockProfileStore) -> Self {
        self.profile_store = Arc::new(store);
        self
    }

    /// Build `AppDeps` that share these mocks, so assertions can be made
    /// on the mocks after the kernel has used them.
    pub fn app_deps(&self) -> AppDeps {
        AppDeps {
            identity: self.identity.clone(),
            gate: self.gate.clone(),
            profile_store: self.profile_store.clone(),
            challenge_ttl: chrono::Duration::seconds(
                crate::domains::session::controller::DEFAULT_CHALLENGE_TTL_SECS,
            ),
        }
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
