//! Purchase handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use compparts_core::{Email, PartRef, PurchaseId};

use crate::db::PurchaseRepository;
use crate::db::purchases::NewPurchase;
use crate::error::{AppError, Result};
use crate::middleware::{Identity, require_owner, require_owner_or_admin};
use crate::models::{LineItem, PurchasedPart};
use crate::routes::DeletedCount;
use crate::services::line_items;
use crate::state::AppState;

/// Owner email supplied as a query parameter on owner-gated listings.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: String,
}

impl OwnerQuery {
    fn parse_email(&self) -> Result<Email> {
        Email::parse(&self.email).map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))
    }
}

/// Request body for recording a purchase.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub buyer_email: String,
    pub buyer_name: String,
    #[serde(rename = "partId")]
    pub part_ref: String,
    pub quantity: i32,
    pub address: String,
    pub phone: String,
}

/// List one buyer's purchases (owner or admin).
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the caller is neither the owner nor an
/// admin.
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<PurchasedPart>>> {
    let owner = query.parse_email()?;
    require_owner_or_admin(state.pool(), &identity, &owner).await?;

    let purchases = PurchaseRepository::new(state.pool())
        .list_by_buyer(&owner)
        .await?;

    Ok(Json(purchases))
}

/// Aggregated purchase line items for one buyer (owner only).
///
/// # Errors
///
/// Returns `AppError::Forbidden` on an ownership mismatch and
/// `AppError::BadReference` if a stored part reference is malformed.
pub async fn details(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<LineItem>>> {
    let owner = query.parse_email()?;
    require_owner(&identity, &owner)?;

    let items = line_items::for_buyer(state.pool(), &owner).await?;

    Ok(Json(items))
}

/// Record a purchase. The buyer email must match the session identity.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the body names a different buyer and
/// `AppError::BadRequest` for a non-positive quantity.
pub async fn create(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreatePurchaseRequest>,
) -> Result<(StatusCode, Json<PurchasedPart>)> {
    let buyer_email = Email::parse(&body.buyer_email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    require_owner(&identity, &buyer_email)?;

    if body.quantity < 1 {
        return Err(AppError::BadRequest(format!(
            "quantity must be positive, got {}",
            body.quantity
        )));
    }

    let purchase = PurchaseRepository::new(state.pool())
        .create(&NewPurchase {
            buyer_email,
            buyer_name: body.buyer_name,
            part_ref: PartRef::new(body.part_ref),
            quantity: body.quantity,
            address: body.address,
            phone: body.phone,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(purchase)))
}

/// Cancel a purchase by id (authenticated).
///
/// Deleting an id that matches nothing reports a zero count, not an error.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn remove(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<PurchaseId>,
) -> Result<Json<DeletedCount>> {
    let deleted_count = PurchaseRepository::new(state.pool()).delete(id).await?;

    Ok(Json(DeletedCount { deleted_count }))
}
