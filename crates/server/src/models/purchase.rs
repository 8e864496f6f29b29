//! Purchase records and aggregated line items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use compparts_core::{Email, PartRef, PurchaseId, UnitPrice};

/// A purchase record.
///
/// Created on purchase, deleted on cancellation, never updated in place.
/// The part reference is stored as an opaque string and only resolved when
/// purchase details are aggregated.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedPart {
    /// Unique purchase ID.
    pub id: PurchaseId,
    /// Buyer email (owner key for all purchase queries).
    pub buyer_email: Email,
    /// Buyer display name.
    pub buyer_name: String,
    /// String-typed reference to the purchased part.
    #[serde(rename = "partId")]
    pub part_ref: PartRef,
    /// Units purchased. Always positive.
    pub quantity: i32,
    /// Delivery address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
    /// When the purchase was made.
    pub created_at: DateTime<Utc>,
}

/// One enriched purchase line combining purchase and part data.
///
/// `total_price` is derived on every call and never persisted. Fields not in
/// this projection are dropped from both source documents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// The purchase this line was derived from.
    pub id: PurchaseId,
    /// Name of the referenced part.
    pub part_name: String,
    /// Buyer display name.
    pub buyer_name: String,
    /// Buyer email.
    pub buyer_email: Email,
    /// Units purchased.
    pub quantity: i32,
    /// Price per unit at aggregation time.
    pub unit_price: UnitPrice,
    /// `quantity x unit_price`.
    pub total_price: Decimal,
    /// Delivery address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
}
