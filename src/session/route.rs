//! Route guarding for the admin console

/// Login entry point
pub const LOGIN_PATH: &str = "/admin/login";

/// Public entry point
pub const PUBLIC_PATH: &str = "/";

/// Prefix of every protected view
pub const ADMIN_PREFIX: &str = "/admin";

/// What a protected view should do for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session check has not finished; show a loading indicator
    Loading,
    /// No usable session; go to the login page, then back to `from`
    RedirectToLogin { from: String },
    /// Authenticated, but not an admin
    RedirectToPublic,
    /// Render the view
    Render,
}

impl RouteDecision {
    /// Target path of a redirect, if this decision is one
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            RouteDecision::RedirectToLogin { .. } => Some(LOGIN_PATH),
            RouteDecision::RedirectToPublic => Some(PUBLIC_PATH),
            RouteDecision::Loading | RouteDecision::Render => None,
        }
    }
}

/// True for paths inside the admin console
pub fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX || path.starts_with("/admin/")
}

/// True for the login page itself
pub fn is_login_path(path: &str) -> bool {
    path.trim_end_matches('/') == LOGIN_PATH
}
