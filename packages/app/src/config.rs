use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::domains::session::controller::DEFAULT_CHALLENGE_TTL_SECS;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Upper bound for `CHALLENGE_TTL_SECS` (one day).
pub const MAX_CHALLENGE_TTL_SECS: i64 = 24 * 60 * 60;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub profile_api_url: String,
    pub firebase_api_key: String,
    /// Identity Toolkit base URL; `None` means the public Google endpoint.
    pub firebase_auth_url: Option<String>,
    /// Pre-solved verification token. When unset the CLI asks for one.
    pub recaptcha_token: Option<String>,
    pub challenge_ttl_secs: i64,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let challenge_ttl_secs = match non_empty("CHALLENGE_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| (1..=MAX_CHALLENGE_TTL_SECS).contains(secs))
                .with_context(|| {
                    format!("CHALLENGE_TTL_SECS must be between 1 and {MAX_CHALLENGE_TTL_SECS}")
                })?,
            None => DEFAULT_CHALLENGE_TTL_SECS,
        };
        let http_timeout_secs = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .context("HTTP_TIMEOUT_SECS must be a positive number")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            profile_api_url: non_empty("PROFILE_API_URL").context("PROFILE_API_URL must be set")?,
            firebase_api_key: non_empty("FIREBASE_API_KEY")
                .context("FIREBASE_API_KEY must be set")?,
            firebase_auth_url: non_empty("FIREBASE_AUTH_URL"),
            recaptcha_token: non_empty("RECAPTCHA_TOKEN"),
            challenge_ttl_secs,
            http_timeout_secs,
        })
    }

    /// Challenge lifetime, clamped to `1..=MAX_CHALLENGE_TTL_SECS` seconds.
    pub fn challenge_ttl(&self) -> chrono::Duration {
        let secs = self.challenge_ttl_secs.clamp(1, MAX_CHALLENGE_TTL_SECS);
        chrono::Duration::try_seconds(secs).unwrap_or_else(chrono::Duration::zero)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("PROFILE_API_URL", "https://profiles.example.com"),
        ("FIREBASE_API_KEY", "test-key"),
    ];

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.challenge_ttl_secs, 300);
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert!(config.firebase_auth_url.is_none());
        assert!(config.recaptcha_token.is_none());
    }

    #[test]
    fn missing_profile_url_is_reported() {
        let err = load(&[("FIREBASE_API_KEY", "k")]).unwrap_err();
        assert!(err.to_string().contains("PROFILE_API_URL"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = load(&[("PROFILE_API_URL", "http://x"), ("FIREBASE_API_KEY", "  ")])
            .unwrap_err();
        assert!(err.to_string().contains("FIREBASE_API_KEY"));
    }

    #[test]
    fn bad_ttl_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CHALLENGE_TTL_SECS", "soon"));
        assert!(load(&pairs).is_err());

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CHALLENGE_TTL_SECS", "0"));
        assert!(load(&pairs).is_err());
    }

    #[test]
    fn out_of_range_ttl_is_reported_not_panicking() {
        for raw in ["10000000000000000", "9223372036854775807", "86401"] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push(("CHALLENGE_TTL_SECS", raw));
            let err = load(&pairs).unwrap_err();
            assert!(err.to_string().contains("CHALLENGE_TTL_SECS"), "for {raw}");
        }

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CHALLENGE_TTL_SECS", "86400"));
        let config = load(&pairs).unwrap();
        assert_eq!(config.challenge_ttl(), chrono::Duration::days(1));
    }

    #[test]
    fn oversized_ttl_field_is_clamped() {
        let mut config = load(&REQUIRED).unwrap();
        config.challenge_ttl_secs = i64::MAX;
        assert_eq!(config.challenge_ttl(), chrono::Duration::days(1));
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("FIREBASE_AUTH_URL", "http://localhost:9099/identitytoolkit.googleapis.com"),
            ("RECAPTCHA_TOKEN", "tok"),
            ("CHALLENGE_TTL_SECS", "60"),
        ]);
        let config = load(&pairs).unwrap();

        assert_eq!(config.challenge_ttl(), chrono::Duration::seconds(60));
        assert_eq!(config.recaptcha_token.as_deref(), Some("tok"));
        assert!(config.firebase_auth_url.is_some());
    }
}
