//! Integration tests for the plant shop API.
//!
//! These tests talk to a running server over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the API against a disposable database
//! cargo run -p plant-shop-api
//!
//! # Run integration tests
//! API_BASE_URL=http://localhost:5000 cargo test -p plant-shop-integration-tests -- --ignored
//! ```

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use plant_shop_core::{PlantId, UserId};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// A unique email address so repeated runs do not collide.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4().simple())
}

/// A unique category so catalog assertions ignore rows from other runs.
#[must_use]
pub fn unique_category() -> String {
    format!("it-{}", Uuid::new_v4().simple())
}

#[derive(Debug, Deserialize)]
struct SignupBody {
    user_id: UserId,
}

#[derive(Debug, Deserialize)]
struct PlantBody {
    id: PlantId,
}

#[derive(Debug, Deserialize)]
struct NewPlantBody {
    plant: PlantBody,
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct TestClient {
    pub client: Client,
    pub base_url: String,
}

impl TestClient {
    /// Create a client for `API_BASE_URL`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
            base_url: api_base_url(),
        }
    }

    /// Full URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a GET and return status plus parsed JSON.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        read(resp).await
    }

    /// Send a JSON POST and return status plus parsed JSON.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        read(resp).await
    }

    /// Send a DELETE, with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn delete(&self, path: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let mut request = self.client.delete(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send().await.expect("Request failed");
        read(resp).await
    }

    /// Register a fresh account and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if signup does not return 201.
    pub async fn signup(&self, email: &str, password: &str) -> UserId {
        let (status, body) = self
            .post(
                "/api/signup",
                &json!({
                    "full_name": "Integration Tester",
                    "email": email,
                    "phone": "555-0100",
                    "password": password,
                    "confirmPassword": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
        serde_json::from_value::<SignupBody>(body)
            .expect("Unexpected signup body")
            .user_id
    }

    /// Add a plant and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if the plant is not created.
    pub async fn add_plant(&self, name: &str, category: &str) -> PlantId {
        let (status, body) = self
            .post(
                "/api/plants",
                &json!({
                    "name": name,
                    "price": "12.50",
                    "image": format!("https://cdn.example.com/{name}.jpg"),
                    "category": category,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "add plant failed: {body}");
        serde_json::from_value::<NewPlantBody>(body)
            .expect("Unexpected plant body")
            .plant
            .id
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn read(resp: reqwest::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}
