//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! compparts-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `COMPPARTS_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

use tracing::info;

use super::{CliError, connect};

/// Run server database migrations.
///
/// # Errors
///
/// Returns `CliError` if the environment is missing the database URL or a
/// migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect()?;

    info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
