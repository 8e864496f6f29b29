//! User account and role handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use compparts_core::{Email, UserId};

use crate::db::{CreateUserOutcome, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::{Identity, RequireAdmin, require_owner};
use crate::models::User;
use crate::routes::DeletedCount;
use crate::state::AppState;

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Response for user creation: either the new id or the already-exists
/// sentinel with no id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub inserted_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for the admin-status check.
#[derive(Debug, Serialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

/// Response for the role promotion, with store matched-count semantics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteResponse {
    pub modified_count: u64,
}

/// List all users (admin only).
///
/// # Errors
///
/// Returns `AppError::Forbidden` without the admin role.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list_all().await?;
    Ok(Json(users))
}

/// Create a user unless the email already exists.
///
/// The duplicate case is a sentinel response, not an error, and inserts
/// nothing.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an invalid email.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>)> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let outcome = UserRepository::new(state.pool())
        .create(&email, &body.name)
        .await?;

    match outcome {
        CreateUserOutcome::Created(user) => Ok((
            StatusCode::CREATED,
            Json(CreateUserResponse {
                inserted_id: Some(user.id),
                message: None,
            }),
        )),
        CreateUserOutcome::AlreadyExists => Ok((
            StatusCode::OK,
            Json(CreateUserResponse {
                inserted_id: None,
                message: Some("user already exists".to_owned()),
            }),
        )),
    }
}

/// Report whether the account for `email` holds the admin role.
///
/// Self-gated: callers may only ask about their own email.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when asking about another identity.
pub async fn admin_status(
    identity: Identity,
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<AdminStatusResponse>> {
    let email = Email::parse(&identifier)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    require_owner(&identity, &email)?;

    let admin = UserRepository::new(state.pool()).is_admin(&email).await?;

    Ok(Json(AdminStatusResponse { admin }))
}

/// Promote a user to admin (admin only). Idempotent: promoting an admin
/// leaves the role as admin and still reports one modified row.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed id and
/// `AppError::Forbidden` without the admin role.
pub async fn promote(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<PromoteResponse>> {
    let id = Uuid::parse_str(&identifier)
        .map(UserId::new)
        .map_err(|_| AppError::BadRequest(format!("invalid user id: {identifier}")))?;

    let modified_count = UserRepository::new(state.pool())
        .promote_to_admin(id)
        .await?;

    Ok(Json(PromoteResponse { modified_count }))
}

/// Delete a user by id (admin only).
///
/// # Errors
///
/// Returns `AppError::Forbidden` without the admin role.
pub async fn remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<DeletedCount>> {
    let deleted_count = UserRepository::new(state.pool()).delete(id).await?;

    Ok(Json(DeletedCount { deleted_count }))
}
