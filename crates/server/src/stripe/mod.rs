//! Payment provider client (Stripe-compatible payment-intent API).
//!
//! # Architecture
//!
//! - Plain REST over `reqwest` with form-encoded request bodies
//! - The server only ever creates and retrieves payment intents; charging
//!   happens client-side against the intent's client secret
//! - Provider failures propagate as [`PaymentError`]; nothing is retried

mod client;

pub use client::{PaymentClient, PaymentIntent};

use thiserror::Error;

/// Errors that can occur when talking to the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed (network, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request.
    #[error("provider error ({status}): {message}")]
    Api {
        /// HTTP status returned by the provider.
        status: u16,
        /// Provider-supplied error message.
        message: String,
    },

    /// The provider response could not be parsed.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The provider response is missing a field the flow depends on.
    #[error("provider response missing {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = PaymentError::Api {
            status: 402,
            message: "Your card was declined.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "provider error (402): Your card was declined."
        );
    }

    #[test]
    fn test_missing_field_display() {
        let err = PaymentError::MissingField("client_secret");
        assert_eq!(err.to_string(), "provider response missing client_secret");
    }
}
