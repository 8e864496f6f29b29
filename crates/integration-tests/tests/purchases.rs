//! Integration tests for purchases and the detail aggregation.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p compparts-server)
//!
//! Run with: cargo test -p compparts-integration-tests -- --ignored

use rust_decimal::Decimal;
use serde_json::Value;

use compparts_integration_tests::{base_url, client, login};

const BUYER: &str = "aggregation-buyer@integration.test";

fn decimal_field(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("expected decimal serialized as string")
        .parse()
        .expect("expected parseable decimal")
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn details_are_owner_gated() {
    let client = client();
    login(&client, "intruder@integration.test").await;

    let resp = client
        .get(format!(
            "{}/purchasedParts/details?email={BUYER}",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to fetch details");
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn details_total_price_matches_quantity_times_unit_price() {
    let client = client();
    login(&client, BUYER).await;

    let resp = client
        .get(format!(
            "{}/purchasedParts/details?email={BUYER}",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to fetch details");
    assert_eq!(resp.status(), 200);

    let items: Vec<Value> = resp.json().await.expect("Invalid JSON");
    for item in &items {
        let quantity = item["quantity"].as_i64().expect("quantity");
        let unit_price = decimal_field(&item["unitPrice"]);
        let total_price = decimal_field(&item["totalPrice"]);
        assert_eq!(total_price, unit_price * Decimal::from(quantity));
        // An item only appears when its part was found
        assert!(item["partName"].is_string());
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn purchase_listing_rejects_other_owner() {
    let client = client();
    login(&client, "intruder@integration.test").await;

    let resp = client
        .get(format!("{}/purchasedParts?email={BUYER}", base_url()))
        .send()
        .await
        .expect("Failed to list purchases");
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn deleting_unknown_purchase_is_zero_effect() {
    let client = client();
    login(&client, BUYER).await;

    // Valid UUID that matches nothing
    let resp = client
        .delete(format!(
            "{}/purchasedParts/00000000-0000-0000-0000-000000000000",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to delete purchase");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(body["deletedCount"], 0);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn purchase_creation_binds_buyer_to_identity() {
    let client = client();
    login(&client, BUYER).await;

    let resp = client
        .post(format!("{}/purchasedParts", base_url()))
        .json(&serde_json::json!({
            "buyerEmail": "someone-else@integration.test",
            "buyerName": "Imposter",
            "partId": "00000000-0000-0000-0000-000000000000",
            "quantity": 1,
            "address": "1 Main St",
            "phone": "555-0100"
        }))
        .send()
        .await
        .expect("Failed to create purchase");
    assert_eq!(resp.status(), 403);
}
