#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Tests drive the REAL router and state, backed by the in-memory document
//! store so no database is needed. Each test builds its own [`TestApp`], so
//! collections never leak between tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use storefront_kernel::store::{Collection, DocumentStore, MemoryDocumentStore};
use storefront_kernel::{AppState, Config, routes};

/// Secret used for every test token.
pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long!!";

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryDocumentStore>,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_config(Config::for_testing(TEST_SECRET))
    }

    /// Create a test application with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = AppState::with_store(&config, store.clone());

        // Must match main.rs apart from CORS
        let router = routes::router()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .with_state(state.clone());

        Self {
            router,
            store,
            state,
        }
    }

    /// Insert documents directly, bypassing HTTP.
    pub async fn seed(&self, collection: Collection, docs: impl IntoIterator<Item = Value>) {
        for doc in docs {
            self.store
                .insert_one(collection, doc)
                .await
                .expect("Failed to seed document");
        }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// GET a path.
    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// DELETE a path.
    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }
}

/// Parse a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(&body);
        panic!("Failed to parse JSON: {text}");
    })
}

/// Read a response body as text.
pub async fn response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}
