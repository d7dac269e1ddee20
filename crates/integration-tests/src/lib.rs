//! Integration tests for the UB-Jewellers catalog server.
//!
//! Each test spawns the full router (request IDs, tracing, CORS and the
//! optional cart guard included) on an ephemeral port, backed by the
//! in-memory document store, and talks to it over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ub-jewellers-integration-tests
//! ```

use std::sync::Arc;

use reqwest::Client;
use secrecy::SecretString;
use serde_json::Value;

use ub_jewellers_core::{CollectionName, Document};
use ub_jewellers_server::config::{ConfigError, ServerConfig};
use ub_jewellers_server::db::MemoryDocumentStore;
use ub_jewellers_server::routes;
use ub_jewellers_server::services::auth::TokenService;
use ub_jewellers_server::state::AppState;

/// Signing secret shared by the spawned server and [`TestContext::tokens`].
pub const TEST_SECRET: &str = "Qw7!eR4@tY1#uI8$oP5%aS2^dF9&gH3*";

/// Builder for a test server.
#[derive(Default)]
pub struct TestServer {
    store: MemoryDocumentStore,
    env: Vec<(String, String)>,
}

impl TestServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection before the server starts.
    #[must_use]
    pub fn with_documents(mut self, collection: CollectionName, docs: Vec<Value>) -> Self {
        self.store = self
            .store
            .with_documents(collection, docs.into_iter().map(object));
        self
    }

    /// Override an environment variable seen by the server configuration.
    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    fn config(&self) -> Result<ServerConfig, ConfigError> {
        ServerConfig::from_source(&|key| {
            self.env
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .or_else(|| match key {
                    "DATABASE_URL" => Some("postgres://localhost/ub_jewellers_test".to_string()),
                    "JWT_SECRET_KEY" => Some(TEST_SECRET.to_string()),
                    "HOST" => Some("127.0.0.1".to_string()),
                    "PORT" => Some("0".to_string()),
                    _ => None,
                })
        })
    }

    /// Bind to an ephemeral port and serve in the background.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid or the listener cannot bind.
    pub async fn spawn(self) -> TestContext {
        let config = self.config().expect("invalid test configuration");
        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no address");

        let app = routes::router(AppState::new(config, Arc::new(self.store)));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server error");
        });

        TestContext {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            tokens: TokenService::new(&SecretString::from(TEST_SECRET.to_string())),
        }
    }
}

/// A running test server and a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    /// Token service using the server's signing secret.
    pub tokens: TokenService,
}

impl TestContext {
    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        (status, resp.json().await.expect("response was not JSON"))
    }
}

/// Unwrap a JSON object literal into a [`Document`].
///
/// # Panics
///
/// Panics if `value` is not an object.
#[must_use]
pub fn object(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Names of the products in a JSON array response, in order.
///
/// # Panics
///
/// Panics if `products` is not an array of objects with string names.
#[must_use]
pub fn product_names(products: &Value) -> Vec<String> {
    products
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|p| p["name"].as_str().expect("product without a name").to_string())
        .collect()
}
