//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn create_profile(client: &Client, firstname: &str, email: &str) -> String {
    let response = client
        .post(format!("{}/profiles", BASE_URL))
        .json(&json!({
            "firstname": firstname,
            "lastname": "Tester",
            "email": email
        }))
        .send()
        .await
        .expect("Failed to create profile");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse profile");
    body["id"].as_str().expect("No profile ID").to_string()
}

async fn create_item(client: &Client, name: &str, owner_id: &str) -> String {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .json(&json!({
            "name": name,
            "price_per_day": "2.50",
            "location": "Oslo",
            "owner_id": owner_id
        }))
        .send()
        .await
        .expect("Failed to create item");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse item");
    body["id"].as_str().expect("No item ID").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "lendhub-server");
}

#[tokio::test]
#[ignore]
async fn test_readiness_probes_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    // With the database up this is a 200; with it down the probe returns 503
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_item() {
    let client = Client::new();
    let owner = create_profile(&client, "Olivia", "olivia.items@example.org").await;
    let item = create_item(&client, "Test Drill", &owner).await;

    let response = client
        .get(format!("{}/items/{}", BASE_URL, item))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/items/{}", BASE_URL, item))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/items/{}", BASE_URL, item))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_update_preserves_blank_fields() {
    let client = Client::new();
    let owner = create_profile(&client, "Per", "per.update@example.org").await;
    let item = create_item(&client, "Ladder", &owner).await;

    let response = client
        .put(format!("{}/items/{}", BASE_URL, item))
        .json(&json!({
            "name": "",
            "price_per_day": "0",
            "condition": "worn"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Ladder");
    assert_eq!(body["condition"], "worn");
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_flow() {
    let client = Client::new();
    let owner = create_profile(&client, "Oskar", "oskar.borrow@example.org").await;
    let borrower = create_profile(&client, "Nadia", "nadia.borrow@example.org").await;
    let item = create_item(&client, "Projector", &owner).await;

    // Borrow without a borrower is a 400
    let response = client
        .post(format!("{}/items/{}/borrow", BASE_URL, item))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Borrow directly
    let response = client
        .post(format!("{}/items/{}/borrow", BASE_URL, item))
        .json(&json!({ "borrower_id": borrower }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["lent"], true);
    assert_eq!(body["borrower_id"], borrower.as_str());

    // A second borrow conflicts
    let response = client
        .post(format!("{}/items/{}/borrow", BASE_URL, item))
        .json(&json!({ "borrower_id": owner }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Return clears the borrow fields
    let response = client
        .post(format!("{}/items/{}/return", BASE_URL, item))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["lent"], false);
    assert!(body["borrower_id"].is_null());
    assert!(body["borrowed_on"].is_null());

    // Returning again conflicts
    let response = client
        .post(format!("{}/items/{}/return", BASE_URL, item))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_request_lifecycle() {
    let client = Client::new();
    let owner = create_profile(&client, "Astrid", "astrid.req@example.org").await;
    let borrower = create_profile(&client, "Jonas", "jonas.req@example.org").await;
    let item = create_item(&client, "Tent", &owner).await;

    // Requesting your own item is a 400
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({ "item_id": item, "borrower_id": owner }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Submit a request
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "item_id": item,
            "borrower_id": borrower,
            "due_at": "2025-01-10T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["item_name"], "Tent");
    let request_id = body["id"].as_str().expect("No request ID").to_string();

    // It shows up in the owner inbox with the borrower's name
    let response = client
        .get(format!("{}/requests/owner/{}", BASE_URL, owner))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let inbox = body.as_array().expect("Inbox is not an array");
    assert!(inbox.iter().any(|r| r["id"] == request_id.as_str()
        && r["borrower_name"] == "Jonas Tester"));

    // Accept it
    let response = client
        .post(format!("{}/requests/{}/respond", BASE_URL, request_id))
        .json(&json!({ "accepted": true }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "accepted");

    // The item is now lent to the borrower
    let response = client
        .get(format!("{}/items/{}", BASE_URL, item))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["lent"], true);
    assert_eq!(body["borrower_id"], borrower.as_str());
    assert_eq!(body["due_at"], "2025-01-10T00:00:00Z");

    // Responding twice conflicts
    let response = client
        .post(format!("{}/requests/{}/respond", BASE_URL, request_id))
        .json(&json!({ "accepted": false }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // A new request against the now-lent item conflicts
    let other = create_profile(&client, "Kari", "kari.req@example.org").await;
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({ "item_id": item, "borrower_id": other }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_profile_email_lookup() {
    let client = Client::new();
    let id = create_profile(&client, "Lina", "lina.lookup@example.org").await;

    let response = client
        .get(format!("{}/profiles?email=LINA.LOOKUP@example.org", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let found = body.as_array().expect("Not an array");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], id.as_str());

    // Duplicate email is a 409
    let response = client
        .post(format!("{}/profiles", BASE_URL))
        .json(&json!({
            "firstname": "Lina",
            "lastname": "Duplicate",
            "email": "lina.lookup@example.org"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}
