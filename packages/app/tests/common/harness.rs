//! In-process stand-ins for the identity provider and the profile store.
//!
//! Each spawn binds 127.0.0.1:0 and returns the base URL to point the real
//! clients at.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_CODE: &str = "123456";
/// Submitting this code makes the toolkit report an expired session.
pub const EXPIRED_CODE: &str = "999999";

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================================
// Identity Toolkit
// =============================================================================

#[derive(Clone, Default)]
pub struct IdentityToolkit {
    /// sessionInfo -> phone
    sessions: Arc<Mutex<HashMap<String, String>>>,
    recaptcha_tokens: Arc<Mutex<Vec<String>>>,
}

impl IdentityToolkit {
    pub fn recaptcha_tokens(&self) -> Vec<String> {
        self.recaptcha_tokens.lock().unwrap().clone()
    }
}

fn toolkit_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "code": 400, "message": message } })),
    )
        .into_response()
}

async fn toolkit_dispatch(
    State(toolkit): State<IdentityToolkit>,
    Path(method): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    match method.as_str() {
        "accounts:sendVerificationCode" => {
            let phone = body["phoneNumber"].as_str().unwrap_or_default().to_string();
            let token = body["recaptchaToken"].as_str().unwrap_or_default().to_string();
            if token.is_empty() {
                return toolkit_error("MISSING_RECAPTCHA_TOKEN");
            }
            toolkit.recaptcha_tokens.lock().unwrap().push(token);

            let mut sessions = toolkit.sessions.lock().unwrap();
            let session_info = format!("session-{}", sessions.len() + 1);
            sessions.insert(session_info.clone(), phone);
            Json(json!({ "sessionInfo": session_info })).into_response()
        }
        "accounts:signInWithPhoneNumber" => {
            let session_info = body["sessionInfo"].as_str().unwrap_or_default();
            let Some(phone) = toolkit.sessions.lock().unwrap().get(session_info).cloned() else {
                return toolkit_error("INVALID_SESSION_INFO");
            };
            match body["code"].as_str() {
                Some(TEST_CODE) => Json(json!({
                    "idToken": format!("id-token-{session_info}"),
                    "refreshToken": "refresh-token",
                    "expiresIn": "3600",
                    "localId": "uid-1",
                    "phoneNumber": phone,
                    "isNewUser": false
                }))
                .into_response(),
                Some(EXPIRED_CODE) => toolkit_error("SESSION_EXPIRED"),
                _ => toolkit_error("INVALID_CODE"),
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn spawn_identity_toolkit() -> (String, IdentityToolkit) {
    let toolkit = IdentityToolkit::default();
    let app = Router::new()
        .route("/v1/:method", post(toolkit_dispatch))
        .with_state(toolkit.clone());
    (serve(app).await, toolkit)
}

// =============================================================================
// Profile store
// =============================================================================

#[derive(Clone, Default)]
pub struct ProfileStore {
    records: Arc<Mutex<HashMap<String, Value>>>,
}

impl ProfileStore {
    pub fn seed(&self, phone: &str, name: &str, email: &str) {
        self.records.lock().unwrap().insert(
            phone.to_string(),
            json!({ "phone": phone, "name": name, "email": email }),
        );
    }

    pub fn get(&self, phone: &str) -> Option<Value> {
        self.records.lock().unwrap().get(phone).cloned()
    }
}

async fn get_user_info(State(store): State<ProfileStore>, Json(body): Json<Value>) -> Json<Value> {
    let phone = body["phone"].as_str().unwrap_or_default();
    Json(store.get(phone).unwrap_or(Value::Null))
}

async fn update_user_info(
    State(store): State<ProfileStore>,
    Json(body): Json<Value>,
) -> &'static str {
    let phone = body["phone"].as_str().unwrap_or_default().to_string();
    store.records.lock().unwrap().insert(phone, body);
    "ok"
}

pub async fn spawn_profile_store() -> (String, ProfileStore) {
    let store = ProfileStore::default();
    let app = Router::new()
        .route("/getUserInfo", post(get_user_info))
        .route("/updateUserInfo", post(update_user_info))
        .with_state(store.clone());
    (serve(app).await, store)
}
