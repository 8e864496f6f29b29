//! Session issue and logout handlers.

use axum::{
    Json,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
};
use serde::{Deserialize, Serialize};

use compparts_core::Email;

use crate::error::{AppError, Result};
use crate::middleware::session::{clear_session_cookie, session_cookie};
use crate::state::AppState;

/// Identity claims supplied by the client at login.
#[derive(Debug, Deserialize)]
pub struct IssueTokenRequest {
    pub email: String,
}

/// Response for session operations.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
}

/// Issue a session cookie for the supplied identity claims.
///
/// The token is valid for one hour; the cookie attributes allow
/// credentialed cross-site requests from browser clients.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an invalid email and
/// `AppError::Internal` if token encoding fails.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<IssueTokenRequest>,
) -> Result<impl IntoResponse> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let token = state
        .session_keys()
        .issue(&email)
        .map_err(|e| AppError::Internal(format!("failed to sign session token: {e}")))?;

    tracing::debug!(email = %email, "session issued");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(SessionResponse { success: true }),
    ))
}

/// Clear the session cookie.
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(SessionResponse { success: true }),
    )
}
