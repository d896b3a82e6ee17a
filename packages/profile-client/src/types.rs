use serde::{Deserialize, Serialize};

/// Body of `POST /getUserInfo`.
#[derive(Debug, Clone, Serialize)]
pub struct GetUserInfoRequest<'a> {
    pub phone: &'a str,
}

/// Stored profile as returned by `POST /getUserInfo`.
///
/// Every field is optional: a phone with no stored profile comes back with
/// nulls (or an empty body).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /updateUserInfo`. The phone is the record key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateUserInfoRequest {
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_info_accepts_nulls_and_missing_fields() {
        let info: UserInfo = serde_json::from_str(r#"{"name":null,"email":"ann@x.com"}"#).unwrap();
        assert_eq!(info.name, None);
        assert_eq!(info.email.as_deref(), Some("ann@x.com"));
        assert_eq!(info.phone, None);
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let body = serde_json::to_value(UpdateUserInfoRequest {
            phone: "+46760000000".into(),
            name: Some("Ann".into()),
            email: None,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({ "phone": "+46760000000", "name": "Ann" }));
    }
}
