//! Session status display model

use chrono::Utc;
use serde::Serialize;

use crate::client::models::UserRecord;
use crate::session::token::decode_claims;
use crate::session::{RoleClass, SessionGuard, SessionState, normalize_role};

/// Snapshot of the local session for `status`
#[derive(Debug, Clone, Serialize)]
pub struct SessionDisplay {
    /// `authenticated` or `anonymous`
    pub state: String,
    pub token_present: bool,
    pub token_valid: bool,
    /// Token expiry, RFC 3339; absent when the token carries none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Seconds until expiry (negative once expired)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
    pub role: String,
    pub admin: bool,
}

impl SessionDisplay {
    pub fn from_guard(guard: &SessionGuard) -> Self {
        let token = guard.token();
        let claims = token.as_deref().and_then(decode_claims);
        let expires = claims.as_ref().and_then(|c| c.expires_at());
        let user = guard.current_user();

        let state = match guard.state() {
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Uninitialized | SessionState::Checking => "checking",
            SessionState::Anonymous => "anonymous",
        };

        let role = match user.as_ref() {
            Some(user) => role_label(user),
            None => "--".to_string(),
        };

        Self {
            state: state.to_string(),
            token_present: token.is_some(),
            token_valid: guard.has_valid_token(),
            expires_at: expires.map(|dt| dt.to_rfc3339()),
            expires_in: expires.map(|dt| dt.signed_duration_since(Utc::now()).num_seconds()),
            admin: guard.is_current_admin(),
            user,
            role,
        }
    }
}

fn role_label(user: &UserRecord) -> String {
    let raw = user.role.as_ref().map(|r| r.raw()).unwrap_or("");
    match normalize_role(user.role.as_ref()) {
        RoleClass::Unknown => "--".to_string(),
        RoleClass::Admin | RoleClass::Other => raw.to_string(),
    }
}
