//! Catalog part handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use compparts_core::{PartId, UnitPrice};

use crate::db::PartRepository;
use crate::db::parts::NewPart;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Part;
use crate::routes::DeletedCount;
use crate::state::AppState;

/// Query parameters for the part listing.
#[derive(Debug, Deserialize)]
pub struct ListPartsQuery {
    pub brand: Option<String>,
}

/// Request body for creating a part.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartRequest {
    pub name: String,
    pub brand: String,
    pub price_per_unit: Decimal,
    #[serde(default = "empty_specs")]
    pub specs: serde_json::Value,
    #[serde(default)]
    pub available_quantity: i32,
    pub image_url: Option<String>,
}

fn empty_specs() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// List catalog parts.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListPartsQuery>,
) -> Result<Json<Vec<Part>>> {
    let parts = PartRepository::new(state.pool())
        .list(query.brand.as_deref())
        .await?;

    Ok(Json(parts))
}

/// Create a catalog part (admin only).
///
/// # Errors
///
/// Returns `AppError::Forbidden` without the admin role and
/// `AppError::Price` for a negative price.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreatePartRequest>,
) -> Result<(StatusCode, Json<Part>)> {
    let price_per_unit = UnitPrice::new(body.price_per_unit)?;

    let part = PartRepository::new(state.pool())
        .create(&NewPart {
            name: body.name,
            brand: body.brand,
            price_per_unit,
            specs: body.specs,
            available_quantity: body.available_quantity,
            image_url: body.image_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(part)))
}

/// Delete a part by id.
///
/// Purchases referencing the part are untouched; they simply drop out of
/// future detail aggregations.
///
/// # Errors
///
/// Returns `AppError::Database` if the query fails.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<PartId>,
) -> Result<Json<DeletedCount>> {
    let deleted = PartRepository::new(state.pool()).delete(id).await?;

    Ok(Json(DeletedCount {
        deleted_count: u64::from(deleted),
    }))
}
