//! Integration tests for FieldOps.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p fieldops-cli -- migrate
//!
//! # Bootstrap the admin account the tests log in with
//! cargo run -p fieldops-cli -- admin create \
//!     -e admin@fieldops.local -n "Test Admin" -p fieldops-admin-password
//!
//! # Start the server
//! cargo run -p fieldops-server
//!
//! # Run integration tests
//! cargo test -p fieldops-integration-tests -- --ignored
//! ```
//!
//! Tests are otherwise self-contained: each one registers its own parttime
//! accounts and creates its own campaigns and stores, with UUID-suffixed
//! names so repeated runs don't collide. Registration always yields the
//! restricted role, so the one admin account has to exist up front.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Shared context for one test: an HTTP client and the server base URL.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build a context against `FIELDOPS_BASE_URL` (default localhost:3001).
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("FIELDOPS_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());

        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Register a fresh parttime account and return its bearer token plus
    /// the email used.
    pub async fn register_and_login(&self) -> (String, String) {
        let email = format!("it-{}@example.com", Uuid::new_v4());
        let password = "integration-test-password";

        let resp = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&json!({
                "full_name": "Integration Test",
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("register request failed");
        assert_eq!(resp.status(), 201, "register should return 201");

        let token = self.login(&email, password).await;
        (token, email)
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let resp = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .expect("login request failed");
        assert_eq!(resp.status(), 200, "login should return 200");

        let body: Value = resp.json().await.expect("login body not JSON");
        body["data"]["token"]
            .as_str()
            .expect("login response missing token")
            .to_string()
    }

    /// Log in as the bootstrapped admin account (see the crate docs) and
    /// return its bearer token.
    ///
    /// Credentials come from `FIELDOPS_TEST_ADMIN_EMAIL` /
    /// `FIELDOPS_TEST_ADMIN_PASSWORD`, matching the `fieldops-cli admin
    /// create` defaults above.
    pub async fn admin_token(&self) -> String {
        let email = std::env::var("FIELDOPS_TEST_ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@fieldops.local".to_string());
        let password = std::env::var("FIELDOPS_TEST_ADMIN_PASSWORD")
            .unwrap_or_else(|_| "fieldops-admin-password".to_string());

        self.login(&email, &password).await
    }

    /// Create a store and return its ID.
    pub async fn create_store(&self, token: &str) -> String {
        let resp = self
            .client
            .post(format!("{}/api/stores", self.base_url))
            .bearer_auth(token)
            .json(&json!({
                "board_name": "TestChain",
                "store_code": format!("IT-{}", Uuid::new_v4()),
                "display_name": "Integration Test Store",
            }))
            .send()
            .await
            .expect("create store request failed");
        assert_eq!(resp.status(), 201, "store create should return 201");

        let body: Value = resp.json().await.expect("store body not JSON");
        body["data"]["id"]
            .as_str()
            .expect("store response missing id")
            .to_string()
    }

    /// Create a campaign and return its ID.
    pub async fn create_campaign(&self, token: &str) -> String {
        let resp = self
            .client
            .post(format!("{}/api/campaigns", self.base_url))
            .bearer_auth(token)
            .json(&json!({
                "name": format!("IT Campaign {}", Uuid::new_v4()),
                "start_date": "2026-09-01",
                "end_date": "2026-09-30",
            }))
            .send()
            .await
            .expect("create campaign request failed");
        assert_eq!(resp.status(), 201, "campaign create should return 201");

        let body: Value = resp.json().await.expect("campaign body not JSON");
        body["data"]["id"]
            .as_str()
            .expect("campaign response missing id")
            .to_string()
    }
}
