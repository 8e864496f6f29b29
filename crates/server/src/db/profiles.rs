//! Profile repository.

use sqlx::PgPool;

use compparts_core::Email;

use super::RepositoryError;
use crate::models::Profile;

/// Repository for append-only profile documents.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a profile document. Repeated submissions for the same email
    /// each insert a new row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        email: &Email,
        profile: &serde_json::Value,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, Profile>(
            "INSERT INTO profile (email, profile) VALUES ($1, $2) \
             RETURNING id, email, profile, created_at",
        )
        .bind(email)
        .bind(profile)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }
}
