// ── Session identity ──
//
// The authenticated user as returned by `POST /auth/login`, plus the
// plain record persisted between runs.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// A login role. Roles the client does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Platform administrator: manages shops and shop admins.
    Admin,
    /// Manages a single shop's employees, rotas, punchings and payouts.
    ShopAdmin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::ShopAdmin => "ShopAdmin",
            Self::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Admin" => Self::Admin,
            "ShopAdmin" => Self::ShopAdmin,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logged-in user.
#[derive(Debug, Clone)]
pub struct Identity {
    pub token: SecretString,
    pub role: Role,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }

    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            token: self.token.expose_secret().to_owned(),
            role: self.role.as_str().to_owned(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    /// Rebuild from a persisted record. A record without a token or role is
    /// not a session.
    pub fn from_record(record: SessionRecord) -> Option<Self> {
        if record.token.is_empty() || record.role.is_empty() {
            return None;
        }
        Some(Self {
            token: SecretString::from(record.token),
            role: Role::from(record.role),
            name: record.name,
            email: record.email,
        })
    }
}

impl From<shopdesk_api::AuthPayload> for Identity {
    fn from(payload: shopdesk_api::AuthPayload) -> Self {
        Self {
            token: payload.token,
            role: Role::from(payload.role),
            name: payload.name,
            email: payload.email,
        }
    }
}

/// Persisted session record: `{token, role, name, email}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRecord")
            .field("token", &"[REDACTED]")
            .field("role", &self.role)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish()
    }
}
