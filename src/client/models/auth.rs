//! Authentication models

use serde::{Deserialize, Serialize};

use crate::session::role::RoleClaim;

/// Login credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Username
    #[serde(rename = "username")]
    pub identifier: String,

    /// Password
    #[serde(rename = "password")]
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

/// Response body of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Signed JWT, absent when the backend declines to issue one
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Option<RoleClaim>,
}

impl LoginResponse {
    /// User record derived from the login response
    pub fn user(&self) -> UserRecord {
        UserRecord {
            id: self.id,
            username: self.username.clone().unwrap_or_default(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Snapshot of the authenticated principal, persisted next to the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Option<RoleClaim>,
}
