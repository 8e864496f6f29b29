//! Catalog part.

use chrono::{DateTime, Utc};
use serde::Serialize;

use compparts_core::{PartId, UnitPrice};

/// A computer part in the catalog.
///
/// `specs` is a free-form attribute document (socket, wattage, form factor,
/// whatever the part calls for); the store does not interpret it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Unique part ID.
    pub id: PartId,
    /// Display name.
    pub name: String,
    /// Manufacturer brand.
    pub brand: String,
    /// Price per unit in the store currency. Never negative.
    pub price_per_unit: UnitPrice,
    /// Free-form specification attributes.
    pub specs: serde_json::Value,
    /// Units available for purchase.
    pub available_quantity: i32,
    /// Optional product image.
    pub image_url: Option<String>,
    /// When the part was added to the catalog.
    pub created_at: DateTime<Utc>,
}
