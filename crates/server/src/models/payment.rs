//! Payment record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use compparts_core::{Email, PaymentId};

/// A recorded payment.
///
/// Append-only: created once the provider confirms the intent succeeded,
/// never updated or deleted through the API.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment ID.
    pub id: PaymentId,
    /// Buyer email.
    pub buyer_email: Email,
    /// Amount in the store currency's standard unit.
    pub amount: Decimal,
    /// Provider payment-intent reference.
    pub transaction_ref: String,
    /// When the payment was recorded.
    pub paid_at: DateTime<Utc>,
}
