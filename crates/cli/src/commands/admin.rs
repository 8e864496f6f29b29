//! Admin bootstrap command.
//!
//! Role elevation is normally an admin-gated API action, which leaves the
//! very first admin unreachable. This command closes the loop by promoting
//! an existing user directly in the store.

use tracing::info;

use compparts_core::Email;
use compparts_server::db::UserRepository;

use super::{CliError, connect};

/// Grant the admin role to an existing user.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` if the email is malformed or no user
/// with that email exists.
pub async fn grant(email: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let pool = connect()?;
    let modified = UserRepository::new(&pool)
        .promote_to_admin_by_email(&email)
        .await?;

    if modified == 0 {
        return Err(CliError::InvalidInput(format!(
            "no user with email {email} (users are created on first login)"
        )));
    }

    info!(%email, "admin role granted");
    Ok(())
}
