//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                          - Liveness text
//!
//! # Session
//! POST   /jwt                       - Issue session cookie from identity claims
//! POST   /logout                    - Clear session cookie
//!
//! # Catalog
//! GET    /parts                     - List parts (optional ?brand=)
//! POST   /parts                     - Create part (admin)
//! DELETE /parts/{id}                - Delete part
//!
//! # Reviews & content
//! GET    /reviews                   - List reviews
//! POST   /reviews                   - Create review
//! GET    /techNews                  - List tech news
//! GET    /buildGuides               - List build guides
//!
//! # Purchases
//! GET    /purchasedParts?email=     - List by owner (owner or admin)
//! POST   /purchasedParts            - Create (authenticated, owner-bound)
//! DELETE /purchasedParts/{id}       - Delete (authenticated), zero-effect ok
//! GET    /purchasedParts/details?email= - Aggregated line items (owner)
//!
//! # Payments
//! POST   /create-payment-intent     - {price} -> {clientSecret}
//! GET    /payments?email=           - List by owner
//! POST   /payments                  - Record provider-verified payment
//!
//! # Profiles & users
//! POST   /myProfiles                - Append profile
//! GET    /users                     - List users (admin)
//! GET    /users/admin/{email}       - {admin: bool} (self)
//! POST   /users                     - Create if email absent, else sentinel
//! PATCH  /users/admin/{id}          - Promote to admin (admin)
//! DELETE /users/{id}                - Delete user (admin)
//! ```

pub mod auth;
pub mod content;
pub mod parts;
pub mod payments;
pub mod profiles;
pub mod purchases;
pub mod reviews;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Count of rows removed by a delete. Deleting a missing id reports zero,
/// mirroring the store's matched-nothing semantics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCount {
    pub deleted_count: u64,
}

/// Liveness text for the root path.
async fn home() -> &'static str {
    "CompParts Hub is running successfully"
}

/// Create all routes for the marketplace API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Liveness
        .route("/", get(home))
        // Session
        .route("/jwt", post(auth::issue_token))
        .route("/logout", post(auth::logout))
        // Catalog
        .route("/parts", get(parts::list).post(parts::create))
        .route("/parts/{id}", delete(parts::remove))
        // Reviews & content
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/techNews", get(content::tech_news))
        .route("/buildGuides", get(content::build_guides))
        // Purchases
        .route(
            "/purchasedParts",
            get(purchases::list).post(purchases::create),
        )
        .route("/purchasedParts/details", get(purchases::details))
        .route("/purchasedParts/{id}", delete(purchases::remove))
        // Payments
        .route("/create-payment-intent", post(payments::create_intent))
        .route("/payments", get(payments::list).post(payments::record))
        // Profiles
        .route("/myProfiles", post(profiles::create))
        // Users
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/admin/{identifier}",
            get(users::admin_status).patch(users::promote),
        )
        .route("/users/{id}", delete(users::remove))
}
