//! REST client for the profile store.
//!
//! The store exposes two JSON-over-POST endpoints under one base URL:
//! `getUserInfo` (lookup by phone) and `updateUserInfo` (upsert keyed by phone).
//!
//! # Example
//!
//! ```rust,ignore
//! use profile_client::{ProfileApiClient, UpdateUserInfoRequest};
//!
//! let client = ProfileApiClient::new("https://region-project.cloudfunctions.net")?;
//!
//! let info = client.get_user_info("+46760000000").await?;
//! client
//!     .update_user_info(&UpdateUserInfoRequest {
//!         phone: "+46760000000".into(),
//!         name: Some("Ann".into()),
//!         email: info.email,
//!     })
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ProfileApiError, Result};
pub use types::{GetUserInfoRequest, UpdateUserInfoRequest, UserInfo};

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ProfileApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProfileApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ProfileApiError::Config(format!("invalid base URL {base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProfileApiError::Config(format!(
                "unsupported scheme {} in {base_url}",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the stored profile for `phone`.
    ///
    /// An empty or `null` body means nothing is stored yet and yields an
    /// empty `UserInfo`.
    pub async fn get_user_info(&self, phone: &str) -> Result<UserInfo> {
        let raw = self
            .post("getUserInfo", &GetUserInfoRequest { phone })
            .await?;

        if raw.trim().is_empty() {
            return Ok(UserInfo::default());
        }

        serde_json::from_str::<Option<UserInfo>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| ProfileApiError::Parse(e.to_string()))
    }

    /// Submit the full record. The acknowledgement body carries no
    /// contract; it is returned as JSON when it parses and as a string
    /// otherwise.
    pub async fn update_user_info(&self, request: &UpdateUserInfoRequest) -> Result<Value> {
        let raw = self.post("updateUserInfo", request).await?;

        if raw.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
    }

    async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<String> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, "Profile API request");

        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ProfileApiError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let client = ProfileApiClient::new("http://localhost:5001/project/us-central1/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5001/project/us-central1");
    }

    #[test]
    fn rejects_malformed_base_url() {
        let err = ProfileApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, ProfileApiError::Config(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ProfileApiClient::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, ProfileApiError::Config(_)));
    }
}
