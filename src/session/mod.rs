//! Session guard
//!
//! Owns the answer to three questions: is there a structurally valid, unexpired
//! token; is a user loaded; and does that user hold the admin role. All
//! persistent state goes through an injected [`SessionStore`].

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use log::{debug, warn};

use crate::client::AuthApi;
use crate::client::models::{Credentials, UserRecord};
use crate::error::{ApiError, Result, describe_error};

pub mod role;
pub mod route;
pub mod store;
pub mod token;

pub use role::{RoleClass, normalize_role};
pub use route::RouteDecision;
#[cfg(test)]
pub use store::MemorySessionStore;
pub use store::{FileSessionStore, SessionStore};

/// Lifecycle of the session within one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Checking,
    Authenticated(UserRecord),
    Anonymous,
}

/// Token and user lifecycle plus admin-role evaluation
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    state: RwLock<SessionState>,
    last_error: RwLock<Option<String>>,
}

impl SessionGuard {
    /// Create a guard over `store`. Call [`initialize`](Self::initialize) before use.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::Uninitialized),
            last_error: RwLock::new(None),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, next: SessionState) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Session state: {} -> {}", discriminant(&state), discriminant(&next));
        *state = next;
    }

    /// Message of the last failed login, cleared on logout
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_last_error(&self, message: Option<String>) {
        *self.last_error.write().unwrap_or_else(PoisonError::into_inner) = message;
    }

    /// Read stored state and settle on Authenticated or Anonymous.
    ///
    /// Partial state (token without user, unparsable user, expired token) is
    /// wiped from storage.
    pub fn initialize(&self) -> SessionState {
        self.set_state(SessionState::Checking);

        let next = match (self.has_valid_token(), self.stored_user()) {
            (true, Some(user)) => SessionState::Authenticated(user),
            _ => {
                debug!("No usable session; clearing storage");
                self.clear_storage();
                SessionState::Anonymous
            }
        };

        self.set_state(next.clone());
        next
    }

    /// Raw bearer token, if stored
    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    /// Client-side token check against the current time
    pub fn has_valid_token(&self) -> bool {
        self.has_valid_token_at(Utc::now().timestamp())
    }

    /// Client-side token check against `now` (seconds since epoch)
    pub fn has_valid_token_at(&self, now: i64) -> bool {
        match self.store.token() {
            Some(token) => token::is_token_valid_at(&token, now),
            None => false,
        }
    }

    /// User currently loaded in memory
    pub fn current_user(&self) -> Option<UserRecord> {
        match self.state() {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Token is valid and a user is loaded
    pub fn has_valid_session(&self) -> bool {
        self.has_valid_token() && self.current_user().is_some()
    }

    /// Admin check for the loaded user
    pub fn is_current_admin(&self) -> bool {
        is_admin(self.current_user().as_ref())
    }

    /// Authenticate against `api` and persist the token and user record.
    ///
    /// On failure nothing stored is changed and the error is returned as-is;
    /// [`last_error`](Self::last_error) holds the message to show.
    pub async fn login(&self, api: &dyn AuthApi, credentials: &Credentials) -> Result<UserRecord> {
        self.set_last_error(None);

        let response = match api.login(credentials).await {
            Ok(response) => response,
            Err(err) => {
                let message = describe_error(&err, "Login failed");
                warn!("Login failed for {}: {}", credentials.identifier, message);
                self.set_last_error(Some(message));
                return Err(err);
            }
        };

        let Some(token) = response.token.as_deref() else {
            let err = ApiError::InvalidResponse("Login response did not include a token".into());
            self.set_last_error(Some("Login failed".to_string()));
            return Err(err.into());
        };

        let user = response.user();
        if let Err(err) = self.persist(token, &user) {
            self.clear_storage();
            self.set_last_error(Some(describe_error(&err, "Login failed")));
            return Err(err);
        }

        debug!("Logged in as {}", user.username);
        self.set_state(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    fn persist(&self, token: &str, user: &UserRecord) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        self.store.set_token(token)?;
        self.store.set_user_raw(&user_json)?;
        Ok(())
    }

    /// Clear the token and user record. Safe to call when already logged out.
    pub fn logout(&self) {
        self.clear_storage();
        self.set_last_error(None);
        self.set_state(SessionState::Anonymous);
    }

    /// Re-read the persisted user record into memory
    #[allow(dead_code)]
    pub fn refresh_user(&self) {
        match self.stored_user() {
            Some(user) => self.set_state(SessionState::Authenticated(user)),
            None => self.set_state(SessionState::Anonymous),
        }
    }

    /// React to a 401 from any request made while showing `current_path`.
    ///
    /// Returns the login path when the caller should navigate there.
    pub fn handle_unauthorized(&self, current_path: &str) -> Option<&'static str> {
        if route::is_login_path(current_path) {
            return None;
        }

        warn!("Request rejected as unauthorized; clearing session");
        self.clear_storage();
        self.set_state(SessionState::Anonymous);

        route::is_admin_path(current_path).then_some(route::LOGIN_PATH)
    }

    /// Decide how a protected view at `requested_path` should render
    pub fn guard_route(&self, requested_path: &str) -> RouteDecision {
        match self.state() {
            SessionState::Uninitialized | SessionState::Checking => RouteDecision::Loading,
            SessionState::Anonymous => RouteDecision::RedirectToLogin {
                from: requested_path.to_string(),
            },
            SessionState::Authenticated(user) => {
                if !self.has_valid_session() {
                    RouteDecision::RedirectToLogin {
                        from: requested_path.to_string(),
                    }
                } else if !is_admin(Some(&user)) {
                    warn!("Access denied for user: {}", user.username);
                    RouteDecision::RedirectToPublic
                } else {
                    RouteDecision::Render
                }
            }
        }
    }

    fn stored_user(&self) -> Option<UserRecord> {
        let raw = self.store.user_raw()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Error parsing stored user record: {}", e);
                None
            }
        }
    }

    fn clear_storage(&self) {
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear session storage: {}", e);
        }
    }
}

fn discriminant(state: &SessionState) -> &'static str {
    match state {
        SessionState::Uninitialized => "Uninitialized",
        SessionState::Checking => "Checking",
        SessionState::Authenticated(_) => "Authenticated",
        SessionState::Anonymous => "Anonymous",
    }
}

/// True iff `user` holds an admin role
pub fn is_admin(user: Option<&UserRecord>) -> bool {
    match user {
        Some(user) => normalize_role(user.role.as_ref()) == RoleClass::Admin,
        None => false,
    }
}
