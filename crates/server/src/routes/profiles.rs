//! Profile handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use compparts_core::Email;

use crate::db::ProfileRepository;
use crate::error::{AppError, Result};
use crate::models::Profile;
use crate::state::AppState;

/// Request body for submitting a profile.
///
/// Everything beyond the email is kept as a free-form document.
#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub email: String,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

/// Append a profile document.
///
/// Submitting twice for the same email inserts two rows; there is no
/// de-duplication.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an invalid email.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>)> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let profile = ProfileRepository::new(state.pool())
        .create(&email, &serde_json::Value::Object(body.profile))
        .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}
