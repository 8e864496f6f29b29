//! User repository for account and role operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use compparts_core::{Email, Role, UserId};

use super::RepositoryError;
use crate::models::User;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` user queries.
///
/// The stored role is free text; parsing it into [`Role`] happens here so a
/// bad value surfaces as data corruption instead of a decode panic.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let role: Role = row
            .role
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            id: UserId::new(row.id),
            email,
            name: row.name,
            role,
            created_at: row.created_at,
        })
    }
}

/// Outcome of a user-creation attempt.
///
/// Creating an account whose email already exists is not an error; the
/// caller gets the sentinel and the stored count is unchanged.
#[derive(Debug)]
pub enum CreateUserOutcome {
    /// A new account was inserted.
    Created(User),
    /// An account with this email already exists; nothing was inserted.
    AlreadyExists,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored value is invalid.
    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, role, created_at \
             FROM app_user ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Look up the stored role for an email.
    ///
    /// Returns `None` if no account exists for the email. Callers re-read on
    /// every authorization check; there is deliberately no caching, so a
    /// revocation takes effect on the next call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored role is invalid.
    pub async fn role_of(&self, email: &Email) -> Result<Option<Role>, RepositoryError> {
        let role: Option<String> =
            sqlx::query_scalar("SELECT role FROM app_user WHERE email = $1")
                .bind(email)
                .fetch_optional(self.pool)
                .await?;

        role.map(|r| {
            r.parse().map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
            })
        })
        .transpose()
    }

    /// Whether the account for `email` holds the admin role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_admin(&self, email: &Email) -> Result<bool, RepositoryError> {
        Ok(self.role_of(email).await?.is_some_and(Role::is_admin))
    }

    /// Create a new user unless the email is already taken.
    ///
    /// Uniqueness is enforced by the store's unique index on `email`; a
    /// concurrent duplicate insert loses the race inside the store and maps
    /// to [`CreateUserOutcome::AlreadyExists`] here. There is no
    /// application-level existence read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` for database errors other than
    /// the unique violation.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
    ) -> Result<CreateUserOutcome, RepositoryError> {
        let result = sqlx::query_as::<_, UserRow>(
            "INSERT INTO app_user (email, name, role) VALUES ($1, $2, $3) \
             RETURNING id, email, name, role, created_at",
        )
        .bind(email)
        .bind(name)
        .bind(Role::Customer.to_string())
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(row) => Ok(CreateUserOutcome::Created(row.try_into()?)),
            Err(e) => {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return Ok(CreateUserOutcome::AlreadyExists);
                }
                Err(RepositoryError::Database(e))
            }
        }
    }

    /// Promote a user to admin.
    ///
    /// # Returns
    ///
    /// The number of rows matched. Promoting an already-admin user matches
    /// one row and leaves the role as `admin`; an unknown id matches zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn promote_to_admin(&self, id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE app_user SET role = $1 WHERE id = $2")
            .bind(Role::Admin.to_string())
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Promote a user to admin by email (CLI bootstrap path).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn promote_to_admin_by_email(&self, email: &Email) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE app_user SET role = $1 WHERE email = $2")
            .bind(Role::Admin.to_string())
            .bind(email)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete a user by id.
    ///
    /// # Returns
    ///
    /// The number of rows deleted; zero for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
