//! User-entered profile.

use chrono::{DateTime, Utc};
use serde::Serialize;

use compparts_core::{Email, ProfileId};

/// A user-entered profile document, keyed loosely by email.
///
/// Inserts are append-only; there is no de-duplication guard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub email: Email,
    /// Free-form personal info as entered by the user.
    pub profile: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
