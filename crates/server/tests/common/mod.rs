//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! with a mock board source and an in-memory preference store, enabling
//! API testing without network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use kanban_core::{
    testing::MockBoardSource, BoardData, BoardSession, BoardSource, Config, PreferenceStore,
    Preferences, SqlitePreferenceStore,
};
use kanban_server::state::AppState;

/// Re-export fixtures for test convenience
pub use kanban_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_board() {
///     let fixture = TestFixture::loaded(fixtures::board_data()).await;
///
///     let response = fixture.get("/api/v1/board?group=user").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock source - script loads and count fetches
    pub source: Arc<MockBoardSource>,
    /// Preference store backing the app state
    pub preference_store: Arc<SqlitePreferenceStore>,
    /// Session shared with the router
    pub session: Arc<BoardSession>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture whose session has not been loaded yet.
    pub async fn new(source: MockBoardSource) -> Self {
        Self::with_preferences(source, Preferences::default()).await
    }

    /// Create a fixture and perform the initial load.
    pub async fn loaded(data: BoardData) -> Self {
        let fixture = Self::new(MockBoardSource::with_data(data)).await;
        fixture
            .session
            .refresh()
            .await
            .expect("Initial load failed");
        fixture
    }

    /// Create a fixture starting from the given preferences.
    pub async fn with_preferences(source: MockBoardSource, preferences: Preferences) -> Self {
        let source = Arc::new(source);
        let preference_store =
            Arc::new(SqlitePreferenceStore::in_memory().expect("Failed to create store"));
        let session = Arc::new(BoardSession::new(
            Arc::clone(&source) as Arc<dyn BoardSource>
        ));

        let state = Arc::new(AppState::new(
            Config::default(),
            Arc::clone(&session),
            Arc::clone(&preference_store) as Arc<dyn PreferenceStore>,
            preferences,
        ));

        let router = kanban_server::api::create_router(state);

        Self {
            router,
            source,
            preference_store,
            session,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request without a body.
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
