//! Request error taxonomy and response mapping.
//!
//! Every handler returns `Result<T, AppError>`. Turning an error into a
//! response captures server-side failures to Sentry first, then renders a
//! JSON body whose detail level depends on the variant: client mistakes are
//! explained, internal failures are not.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use compparts_core::PriceError;

use crate::db::RepositoryError;
use crate::stripe::PaymentError;

/// Application-level error type for the marketplace API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store query or write failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// The payment provider failed or rejected a call.
    #[error("Payment provider error: {0}")]
    Payment(#[from] PaymentError),

    /// Price failed boundary validation.
    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    /// Request carries no valid session token.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Verified identity lacks the required role or ownership.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A stored part reference could not be resolved to an identifier.
    #[error("Bad reference: {0}")]
    BadReference(String),

    /// No such resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request itself is malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Anything that should never happen in normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_) | Self::Payment(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Payment(_) => StatusCode::BAD_GATEWAY,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadReference(_) | Self::BadRequest(_) | Self::Price(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Internal detail stays in logs and Sentry, not in the body
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Payment(_) => "Payment provider error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("part-123".to_string());
        assert_eq!(err.to_string(), "Not found: part-123");

        let err = AppError::BadReference("not-a-part-id".to_string());
        assert_eq!(err.to_string(), "Bad reference: not-a-part-id");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::Unauthenticated("no token".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("not an admin".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::BadReference("zzz".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_leaked() {
        let response = AppError::Internal("pool exhausted at 10.0.0.3".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The body is generic; the detail stays in logs and Sentry.
    }
}
