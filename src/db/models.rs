use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role tag, stored lowercase in the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Secretary,
    Treasurer,
    VicePresident,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Secretary => "secretary",
            Role::Treasurer => "treasurer",
            Role::VicePresident => "vicepresident",
            Role::Guest => "guest",
        }
    }

    /// Operator-facing label used in the credential printout.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Secretary => "Secretary",
            Role::Treasurer => "Treasurer",
            Role::VicePresident => "Vice President",
            Role::Guest => "Guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert payload for the `users` table. Server-side defaults fill in the
/// id and timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub password_hash: String,
    pub is_active: bool,
}

/// A `users` row as returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
