//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::watch;
use tower::ServiceExt;

use reshub_api::{AppState, build_app, build_state};
use reshub_cache::provider::CounterStoreManager;
use reshub_core::config::AppConfig;
use reshub_worker::{JobId, JobState};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for inspecting the queue and store directly
    pub state: AppState,
    /// Keeps the workers alive for the lifetime of the test
    shutdown_tx: watch::Sender<bool>,
}

impl TestApp {
    /// Create a test application with the default configuration and the
    /// in-memory store
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let store = CounterStoreManager::new(&config.store)
            .await
            .expect("Failed to init counter store");
        Self::with_store(config, store).await
    }

    /// Create a test application over a custom counter store
    pub async fn with_store(config: AppConfig, store: CounterStoreManager) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state = build_state(config, store, shutdown_rx)
            .await
            .expect("Failed to build state");

        Self {
            router: build_app(state.clone()),
            state,
            shutdown_tx,
        }
    }

    /// Send a GET request and parse the JSON body
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Wait for a job to settle, failing the test after a few seconds
    pub async fn settle(&self, id: JobId) -> JobState {
        tokio::time::timeout(
            std::time::Duration::from_secs(5),
            self.state.queue.wait_for(id),
        )
        .await
        .expect("Job did not settle in time")
        .expect("Job vanished from the queue")
        .state
    }

    /// Stop the workers
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
