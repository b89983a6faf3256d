//! End-to-end tests against a running API.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the schema from `plant_shop_api::db`
//! - The API server running (cargo run -p plant-shop-api)
//!
//! Run with: cargo test -p plant-shop-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use plant_shop_integration_tests::{TestClient, unique_category, unique_email};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "requires running server"]
async fn test_readiness_reports_database() {
    let client = TestClient::new();
    let resp = client
        .client
        .get(client.url("/health/ready"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
#[ignore = "requires running server"]
async fn test_signup_then_login() {
    let client = TestClient::new();
    let email = unique_email();
    let user_id = client.signup(&email, "monstera-deliciosa").await;

    let (status, body) = client
        .post(
            "/api/login",
            &json!({ "email": email, "password": "monstera-deliciosa" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], json!(user_id));
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_duplicate_signup_rejected() {
    let client = TestClient::new();
    let email = unique_email();
    client.signup(&email, "first").await;

    let (status, _) = client
        .post(
            "/api/signup",
            &json!({
                "full_name": "Someone Else",
                "email": email,
                "password": "second",
                "confirmPassword": "second",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_login_failures_are_indistinguishable() {
    let client = TestClient::new();
    let email = unique_email();
    client.signup(&email, "correct-horse").await;

    let (_, wrong_password) = client
        .post("/api/login", &json!({ "email": email, "password": "battery" }))
        .await;
    let (_, unknown_email) = client
        .post(
            "/api/login",
            &json!({ "email": unique_email(), "password": "correct-horse" }),
        )
        .await;
    assert_eq!(wrong_password, unknown_email);
}

// ============================================================================
// Catalog, Favorites, Cart
// ============================================================================

#[tokio::test]
#[ignore = "requires running server"]
async fn test_category_filter() {
    let client = TestClient::new();
    let category = unique_category();
    client.add_plant("fern", &category).await;
    client.add_plant("ivy", &category).await;

    let (status, body) = client.get(&format!("/api/plants?category={category}")).await;
    assert_eq!(status, StatusCode::OK);
    let plants = body.as_array().expect("Expected array");
    assert_eq!(plants.len(), 2);
    assert!(plants.iter().all(|p| p["category"] == Value::from(category.clone())));
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_favorite_round_trip() {
    let client = TestClient::new();
    let user_id = client.signup(&unique_email(), "pw").await;
    let plant_id = client.add_plant("calathea", &unique_category()).await;
    let pair = json!({ "user_id": user_id, "plant_id": plant_id });

    let (status, _) = client.post("/api/favorites", &pair).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = client.post("/api/favorites", &pair).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = client.get(&format!("/api/favorites/{user_id}")).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, _) = client.delete("/api/favorites", Some(&pair)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = client.delete("/api/favorites", Some(&pair)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_cart_merge_and_checkout() {
    let client = TestClient::new();
    let user_id = client.signup(&unique_email(), "pw").await;
    let plant_id = client.add_plant("pothos", &unique_category()).await;

    for quantity in [2, 3] {
        let (status, _) = client
            .post(
                "/api/cart",
                &json!({ "user_id": user_id, "plant_id": plant_id, "quantity": quantity }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = client.get(&format!("/api/cart/{user_id}")).await;
    let lines = body.as_array().expect("Expected array");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 5);

    let (status, body) = client
        .post("/api/checkout", &json!({ "user_id": user_id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items_removed"], 1);

    let (_, body) = client.get(&format!("/api/cart/{user_id}")).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}
