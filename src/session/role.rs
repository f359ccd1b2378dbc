//! Role normalization
//!
//! The backend emits the role either as a bare string (`"ADMIN"`) or as an
//! object with a name (`{"name": "ADMIN"}`), and may or may not add the
//! `ROLE_` prefix.

use serde::{Deserialize, Serialize};

/// Canonical admin role spellings, compared after uppercasing
pub const ADMIN_ROLES: [&str; 2] = ["ADMIN", "ROLE_ADMIN"];

/// Role as stored in the user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    Name(String),
    Nested {
        #[serde(default)]
        name: Option<String>,
    },
}

impl RoleClaim {
    /// Raw role text: the nested name, else the bare string, else empty
    pub fn raw(&self) -> &str {
        match self {
            RoleClaim::Name(name) => name,
            RoleClaim::Nested { name } => name.as_deref().unwrap_or(""),
        }
    }
}

impl From<&str> for RoleClaim {
    fn from(value: &str) -> Self {
        RoleClaim::Name(value.to_string())
    }
}

/// Role class after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleClass {
    Admin,
    Other,
    Unknown,
}

/// Normalize a role claim to its class.
pub fn normalize_role(role: Option<&RoleClaim>) -> RoleClass {
    let raw = role.map(RoleClaim::raw).unwrap_or("");
    if raw.is_empty() {
        return RoleClass::Unknown;
    }

    let upper = raw.to_uppercase();
    if ADMIN_ROLES.contains(&upper.as_str()) {
        RoleClass::Admin
    } else {
        RoleClass::Other
    }
}
