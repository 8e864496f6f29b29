//! Integration tests for CompParts Hub.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p compparts-cli -- migrate
//!
//! # Start the server
//! cargo run -p compparts-server
//!
//! # Run integration tests (they are ignored by default)
//! cargo test -p compparts-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP; the base URL is configurable
//! via `COMPPARTS_BASE_URL` (default `http://localhost:5000`).

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("COMPPARTS_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Create an HTTP client with a cookie store, so the session cookie issued
/// by `/jwt` is carried on subsequent requests.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in as `email`: POST /jwt and keep the session cookie in the client.
///
/// # Panics
///
/// Panics if the server is unreachable or refuses the login.
pub async fn login(client: &reqwest::Client, email: &str) {
    let resp = client
        .post(format!("{}/jwt", base_url()))
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await
        .expect("Failed to reach /jwt");

    assert!(resp.status().is_success(), "login failed: {}", resp.status());
}
