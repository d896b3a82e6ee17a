//! Phone sign-in against the Firebase Identity Toolkit REST API.
//!
//! Two calls make up the flow:
//! 1. `accounts:sendVerificationCode` texts a one-time code to the phone and
//!    returns an opaque `sessionInfo`.
//! 2. `accounts:signInWithPhoneNumber` exchanges `sessionInfo` + code for an
//!    authenticated user.
//!
//! # Example
//!
//! ```rust,ignore
//! use firebase_auth::{FirebaseAuthOptions, FirebaseAuthService};
//!
//! let auth = FirebaseAuthService::new(FirebaseAuthOptions::new("api-key".into()))?;
//! let pending = auth.send_verification_code("+46760000000", &recaptcha_token).await?;
//! let user = auth.sign_in_with_phone_number(&pending.session_info, "123456").await?;
//! ```

use std::time::Duration;

pub mod error;
pub mod models;

pub use error::{FirebaseAuthError, Result};
pub use models::{SendVerificationCodeResponse, SignInWithPhoneNumberResponse};

use models::{ErrorEnvelope, SendVerificationCodeRequest, SignInWithPhoneNumberRequest};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct FirebaseAuthOptions {
    pub api_key: String,
    /// Scheme + host of the Identity Toolkit. Point it at the auth emulator
    /// (`http://localhost:9099/identitytoolkit.googleapis.com`) for local runs.
    pub base_url: String,
    pub timeout: Duration,
}

impl FirebaseAuthOptions {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct FirebaseAuthService {
    options: FirebaseAuthOptions,
    client: Client,
}

impl FirebaseAuthService {
    pub fn new(options: FirebaseAuthOptions) -> Result<Self> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { options, client })
    }

    /// Send a one-time code to `phone_number`.
    ///
    /// `recaptcha_token` is the solved human-verification challenge; the API
    /// rejects the request with `CAPTCHA_CHECK_FAILED` without it.
    pub async fn send_verification_code(
        &self,
        phone_number: &str,
        recaptcha_token: &str,
    ) -> Result<SendVerificationCodeResponse> {
        let body = SendVerificationCodeRequest {
            phone_number,
            recaptcha_token,
        };

        self.post("sendVerificationCode", &body).await
    }

    /// Confirm the code received for a previously issued `session_info`.
    pub async fn sign_in_with_phone_number(
        &self,
        session_info: &str,
        code: &str,
    ) -> Result<SignInWithPhoneNumberResponse> {
        let body = SignInWithPhoneNumberRequest { session_info, code };

        self.post("signInWithPhoneNumber", &body).await
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/v1/accounts:{}",
            self.options.base_url.trim_end_matches('/'),
            method
        )
    }

    async fn post<B, R>(&self, method: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(method);
        debug!(%url, "Identity Toolkit request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.options.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or(raw);

            debug!(method, status = status.as_u16(), %message, "Identity Toolkit returned an error");
            return Err(FirebaseAuthError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| FirebaseAuthError::Parse(e.to_string()))
    }
}
