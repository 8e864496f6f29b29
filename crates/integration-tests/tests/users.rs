//! Integration tests for user accounts and role gating.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p compparts-server)
//!
//! Run with: cargo test -p compparts-integration-tests -- --ignored

use serde_json::Value;

use compparts_integration_tests::{base_url, client, login};

/// A throwaway email unique to this test process.
fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("{prefix}-{}-{nanos}@integration.test", std::process::id())
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn duplicate_user_creation_returns_sentinel() {
    let client = client();
    let email = unique_email("dup");
    let body = serde_json::json!({ "email": email, "name": "Dup Tester" });

    // First creation inserts
    let resp = client
        .post(format!("{}/users", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.expect("Invalid JSON");
    assert!(created["insertedId"].is_string());

    // Second creation returns the sentinel with no id
    let resp = client
        .post(format!("{}/users", base_url()))
        .json(&body)
        .send()
        .await
        .expect("Failed to repeat user creation");
    assert_eq!(resp.status(), 200);
    let sentinel: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(sentinel["message"], "user already exists");
    assert!(sentinel["insertedId"].is_null());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn admin_status_is_self_gated() {
    let client = client();
    let email = unique_email("self");
    login(&client, &email).await;

    // Asking about your own email works
    let resp = client
        .get(format!("{}/users/admin/{email}", base_url()))
        .send()
        .await
        .expect("Failed to query admin status");
    assert_eq!(resp.status(), 200);
    let status: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(status["admin"], false);

    // Asking about someone else is forbidden
    let resp = client
        .get(format!(
            "{}/users/admin/someone-else@integration.test",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to query admin status");
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn user_list_requires_admin_role() {
    let client = client();
    login(&client, &unique_email("nonadmin")).await;

    let resp = client
        .get(format!("{}/users", base_url()))
        .send()
        .await
        .expect("Failed to list users");
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
#[ignore = "Requires running server, database, and a bootstrapped admin"]
async fn role_promotion_is_idempotent() {
    // Bootstrap first: cargo run -p compparts-cli -- admin grant -e <email>
    let admin_email = std::env::var("COMPPARTS_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@integration.test".to_string());
    let client = client();
    login(&client, &admin_email).await;

    // Create a fresh user to promote
    let email = unique_email("promote");
    let resp = client
        .post(format!("{}/users", base_url()))
        .json(&serde_json::json!({ "email": email, "name": "Promotee" }))
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.expect("Invalid JSON");
    let id = created["insertedId"].as_str().expect("insertedId").to_owned();

    // Promote twice; both calls match the row and the role stays admin
    for _ in 0..2 {
        let resp = client
            .patch(format!("{}/users/admin/{id}", base_url()))
            .send()
            .await
            .expect("Failed to promote user");
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.expect("Invalid JSON");
        assert_eq!(body["modifiedCount"], 1);
    }

    let resp = client
        .get(format!("{}/users", base_url()))
        .send()
        .await
        .expect("Failed to list users");
    assert_eq!(resp.status(), 200);
    let users: Vec<Value> = resp.json().await.expect("Invalid JSON");
    let promoted = users
        .iter()
        .find(|u| u["email"] == email.as_str())
        .expect("promoted user in list");
    assert_eq!(promoted["role"], "admin");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn unauthenticated_user_list_is_rejected() {
    let resp = client()
        .get(format!("{}/users", base_url()))
        .send()
        .await
        .expect("Failed to list users");
    assert_eq!(resp.status(), 401);
}
