//! Authentication extractor and authorization gates.
//!
//! [`Identity`] is the session verifier: it reads the `token` cookie,
//! checks the signature and expiry, and yields the verified email. The gate
//! functions and [`RequireAdmin`] then authorize the verified identity
//! against stored roles or resource-owner emails.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use sqlx::PgPool;

use compparts_core::Email;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::state::AppState;
use crate::middleware::session::{SESSION_COOKIE_NAME, cookie_value};

/// The verified identity attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Email claim from the session token.
    pub email: Email,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| cookie_value(header, SESSION_COOKIE_NAME))
            .ok_or_else(|| AppError::Unauthenticated("missing session token".to_owned()))?;

        let claims = state.session_keys().verify(token).map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            AppError::Unauthenticated("invalid or expired session token".to_owned())
        })?;

        let email = Email::parse(&claims.sub)
            .map_err(|_| AppError::Unauthenticated("invalid session claims".to_owned()))?;

        Ok(Self { email })
    }
}

/// Extractor that requires an authenticated identity with the admin role.
///
/// The stored role is re-read on every call; revoking admin mid-session
/// takes effect on the next request.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(
///     RequireAdmin(identity): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.email)
/// }
/// ```
pub struct RequireAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;

        let is_admin = UserRepository::new(state.pool())
            .is_admin(&identity.email)
            .await?;

        if !is_admin {
            return Err(AppError::Forbidden("admin role required".to_owned()));
        }

        Ok(Self(identity))
    }
}

/// Reject unless the verified identity owns the resource.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if `owner` differs from the identity's
/// email.
pub fn require_owner(identity: &Identity, owner: &Email) -> Result<(), AppError> {
    if identity.email == *owner {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "access restricted to the resource owner".to_owned(),
        ))
    }
}

/// Reject unless the identity owns the resource or holds the admin role.
///
/// # Errors
///
/// Returns `AppError::Forbidden` on an ownership mismatch without the admin
/// role, or a database error from the role read.
pub async fn require_owner_or_admin(
    pool: &PgPool,
    identity: &Identity,
    owner: &Email,
) -> Result<(), AppError> {
    if identity.email == *owner {
        return Ok(());
    }

    if UserRepository::new(pool).is_admin(&identity.email).await? {
        return Ok(());
    }

    Err(AppError::Forbidden(
        "access restricted to the resource owner".to_owned(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_require_owner_accepts_matching_email() {
        let identity = Identity {
            email: Email::parse("buyer@example.com").unwrap(),
        };
        let owner = Email::parse("buyer@example.com").unwrap();
        assert!(require_owner(&identity, &owner).is_ok());
    }

    #[test]
    fn test_require_owner_rejects_other_email() {
        let identity = Identity {
            email: Email::parse("buyer@example.com").unwrap(),
        };
        let owner = Email::parse("someone-else@example.com").unwrap();
        assert!(matches!(
            require_owner(&identity, &owner),
            Err(AppError::Forbidden(_))
        ));
    }
}
