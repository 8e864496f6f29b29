//! Payment provider API client implementation.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::StripeConfig;
use crate::stripe::PaymentError;

/// A payment intent as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Provider intent id (the transaction reference we record).
    pub id: String,
    /// Client-usable secret handle. Only present for the key that created
    /// the intent.
    pub client_secret: Option<String>,
    /// Provider-side status (`requires_payment_method`, `succeeded`, ...).
    pub status: String,
    /// Amount in minor units.
    pub amount: i64,
}

impl PaymentIntent {
    /// Whether the provider reports the intent as fully paid.
    #[must_use]
    pub fn is_succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// Client for the payment provider's payment-intent API.
#[derive(Clone)]
pub struct PaymentClient {
    inner: Arc<PaymentClientInner>,
}

struct PaymentClientInner {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
    currency: String,
}

impl PaymentClient {
    /// Create a new payment client.
    #[must_use]
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            inner: Arc::new(PaymentClientInner {
                client: reqwest::Client::new(),
                api_base: config.api_base.trim_end_matches('/').to_string(),
                secret_key: config.secret_key.expose_secret().to_string(),
                currency: config.currency.clone(),
            }),
        }
    }

    /// Create a payment intent for `amount_minor` minor units.
    ///
    /// The caller is responsible for the minor-unit conversion; see
    /// `UnitPrice::minor_units`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] if the request fails, the provider rejects
    /// it, or the response carries no client secret.
    pub async fn create_intent(&self, amount_minor: i64) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.inner.api_base);
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", self.inner.currency.clone()),
        ];

        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(&self.inner.secret_key)
            .form(&params)
            .send()
            .await?;

        let intent = Self::parse_intent(response).await?;
        if intent.client_secret.is_none() {
            return Err(PaymentError::MissingField("client_secret"));
        }

        tracing::debug!(intent_id = %intent.id, amount = amount_minor, "payment intent created");
        Ok(intent)
    }

    /// Retrieve a payment intent by id.
    ///
    /// Used to verify provider-side status before a payment is recorded; a
    /// client's claim of success is never trusted on its own.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] if the request fails or the provider
    /// rejects it (including an unknown intent id).
    pub async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents/{intent_id}", self.inner.api_base);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.secret_key)
            .send()
            .await?;

        Self::parse_intent(response).await
    }

    /// Turn a provider response into an intent or a typed error.
    async fn parse_intent(response: reqwest::Response) -> Result<PaymentIntent, PaymentError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "payment provider returned non-success status"
            );
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Pull the human-readable message out of a provider error body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "(no error details provided)".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"message": "No such payment_intent: pi_123", "type": "invalid_request_error"}}"#;
        assert_eq!(
            extract_error_message(body),
            "No such payment_intent: pi_123"
        );
    }

    #[test]
    fn test_extract_error_message_malformed_body() {
        assert_eq!(
            extract_error_message("<html>gateway timeout</html>"),
            "(no error details provided)"
        );
    }

    #[test]
    fn test_intent_deserializes_and_reports_status() {
        let body = r#"{
            "id": "pi_3Nv0",
            "client_secret": "pi_3Nv0_secret_abc",
            "status": "succeeded",
            "amount": 1999,
            "currency": "usd"
        }"#;
        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert!(intent.is_succeeded());
        assert_eq!(intent.amount, 1999);
        assert_eq!(intent.client_secret.as_deref(), Some("pi_3Nv0_secret_abc"));
    }

    #[test]
    fn test_intent_without_secret() {
        let body = r#"{"id": "pi_3Nv0", "status": "requires_payment_method", "amount": 500}"#;
        let intent: PaymentIntent = serde_json::from_str(body).unwrap();
        assert!(!intent.is_succeeded());
        assert!(intent.client_secret.is_none());
    }
}
