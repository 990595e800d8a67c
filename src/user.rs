//! User identity types shared by the session and ticket stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access role attached to a [`User`].
///
/// Admins triage, assign, and resolve any ticket; clients create tickets
/// and see only their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Admin,
}

impl UserRole {
    /// The storage label for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Client => "client",
            UserRole::Admin => "admin",
        }
    }

    /// Whether this role may see and mutate tickets it does not own.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated identity.
///
/// Immutable once created -- there is no profile-update operation. The
/// serialized form is the persisted `currentUser` document: camelCase keys,
/// optional fields omitted when absent, and never a password field (the
/// roster keeps passwords outside this type, see
/// [`Credential`](crate::Credential)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user id.
    pub id: String,
    /// Login name, unique across the roster.
    pub username: String,
    pub email: String,
    pub role: UserRole,
    /// Organizational department, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}
