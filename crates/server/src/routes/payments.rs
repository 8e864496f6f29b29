//! Payment-intent and payment-record handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use compparts_core::{Email, UnitPrice};

use crate::db::PaymentRepository;
use crate::error::{AppError, Result};
use crate::middleware::{Identity, require_owner};
use crate::models::Payment;
use crate::routes::purchases::OwnerQuery;
use crate::state::AppState;

/// Request body for creating a payment intent.
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub price: Decimal,
}

/// Response carrying the client-usable secret handle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

/// Request body for recording a completed payment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub email: String,
    pub payment_intent_id: String,
}

/// Create a payment intent for a price in the store currency.
///
/// The price is converted to integer minor units at this boundary; a price
/// that does not divide into whole cents is rejected rather than passed to
/// the provider unrounded.
///
/// # Errors
///
/// Returns `AppError::Price` for a negative or fractional-cent price and
/// `AppError::Payment` if the provider call fails.
pub async fn create_intent(
    State(state): State<AppState>,
    Json(body): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>> {
    let amount_minor = UnitPrice::new(body.price)?.minor_units()?;

    let intent = state.payments().create_intent(amount_minor).await?;
    let client_secret = intent
        .client_secret
        .ok_or(AppError::Internal("intent missing client secret".to_owned()))?;

    Ok(Json(CreateIntentResponse { client_secret }))
}

/// List one buyer's payments (owner only).
///
/// # Errors
///
/// Returns `AppError::Forbidden` on an ownership mismatch.
pub async fn list(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<Payment>>> {
    let owner = Email::parse(&query.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    require_owner(&identity, &owner)?;

    let payments = PaymentRepository::new(state.pool())
        .list_by_buyer(&owner)
        .await?;

    Ok(Json(payments))
}

/// Record a payment after verifying it with the provider.
///
/// The client's claim of success is not trusted: the intent is retrieved
/// from the provider and must report `succeeded` before anything is
/// written. The recorded amount comes from the provider, not the client.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the intent has not succeeded,
/// `AppError::Payment` if the provider lookup fails, and
/// `AppError::Forbidden` on an ownership mismatch.
pub async fn record(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<Payment>)> {
    let buyer = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    require_owner(&identity, &buyer)?;

    let intent = state
        .payments()
        .retrieve_intent(&body.payment_intent_id)
        .await?;

    if !intent.is_succeeded() {
        return Err(AppError::BadRequest(format!(
            "payment has not completed (provider status: {})",
            intent.status
        )));
    }

    // Provider amounts are minor units; stored amounts are standard units.
    let amount = Decimal::new(intent.amount, 2);

    let payment = PaymentRepository::new(state.pool())
        .create(&buyer, amount, &intent.id)
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}
