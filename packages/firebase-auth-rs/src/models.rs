use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationCodeRequest<'a> {
    pub phone_number: &'a str,
    pub recaptcha_token: &'a str,
}

/// Response of `accounts:sendVerificationCode`.
///
/// `session_info` is the opaque handle that must be echoed back when the
/// code is confirmed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationCodeResponse {
    pub session_info: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithPhoneNumberRequest<'a> {
    pub session_info: &'a str,
    pub code: &'a str,
}

/// Response of `accounts:signInWithPhoneNumber`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInWithPhoneNumberResponse {
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds, sent as a string by the API.
    #[serde(default)]
    pub expires_in: Option<String>,
    pub local_id: String,
    pub phone_number: String,
    #[serde(default)]
    pub is_new_user: bool,
}

/// Error envelope: `{ "error": { "code": 400, "message": "INVALID_CODE" } }`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_uses_camel_case() {
        let body = serde_json::to_value(SendVerificationCodeRequest {
            phone_number: "+46760000000",
            recaptcha_token: "tok",
        })
        .unwrap();

        assert_eq!(body["phoneNumber"], "+46760000000");
        assert_eq!(body["recaptchaToken"], "tok");
    }

    #[test]
    fn sign_in_response_tolerates_missing_optional_fields() {
        let parsed: SignInWithPhoneNumberResponse = serde_json::from_str(
            r#"{"idToken":"id","localId":"uid-1","phoneNumber":"+46760000000"}"#,
        )
        .unwrap();

        assert_eq!(parsed.local_id, "uid-1");
        assert!(parsed.refresh_token.is_none());
        assert!(!parsed.is_new_user);
    }
}
