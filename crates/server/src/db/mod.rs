//! Database operations for the marketplace `PostgreSQL` store.
//!
//! # Collections
//!
//! Seven independent tables, one repository each. There are no foreign-key
//! constraints between them and no cascading deletes; a purchase's part
//! reference is an opaque string resolved only during aggregation.
//!
//! - `part` - catalog items
//! - `review` - customer reviews
//! - `tech_news` / `build_guide` - bulk-loaded editorial content
//! - `purchased_part` - purchase records
//! - `payment` - append-only payment records
//! - `profile` - append-only user-entered profiles
//! - `app_user` - accounts and roles (email unique)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p compparts-cli -- migrate
//! ```

pub mod content;
pub mod parts;
pub mod payments;
pub mod profiles;
pub mod purchases;
pub mod reviews;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use content::ContentRepository;
pub use parts::PartRepository;
pub use payments::PaymentRepository;
pub use profiles::ProfileRepository;
pub use purchases::PurchaseRepository;
pub use reviews::ReviewRepository;
pub use users::{CreateUserOutcome, UserRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool connects lazily: an unreachable database does not prevent the
/// process from starting, it fails each request until the store comes back.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url.expose_secret())
}
