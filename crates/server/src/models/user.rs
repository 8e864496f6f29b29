//! User account domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use compparts_core::{Email, Role, UserId};

/// A marketplace user account.
///
/// Created on first login; the role is only ever elevated by an admin action
/// and the email is unique (enforced by the store's unique index).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Stored role.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
