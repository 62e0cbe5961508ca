//! Integration tests for the product catalog and stock reservations.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use serde_json::json;

use reshub_cache::memory::MemoryCounterStore;
use reshub_cache::provider::CounterStoreManager;
use reshub_core::AppResult;
use reshub_core::config::AppConfig;
use reshub_core::error::AppError;
use reshub_core::traits::{CounterStore, DecrementOutcome};
use reshub_core::types::ResourceItem;

/// Seeds and reads normally but loses the connection on every decrement.
#[derive(Debug, Default)]
struct FlakyStore {
    inner: MemoryCounterStore,
}

#[async_trait]
impl CounterStore for FlakyStore {
    async fn get(&self, key: &str) -> AppResult<Option<u64>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: u64) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn decrement_if_positive(&self, _key: &str) -> AppResult<DecrementOutcome> {
        Err(AppError::store_unavailable("Redis error: connection reset"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn test_list_products_returns_catalog() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/list_products").await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.as_array().expect("array body");
    assert_eq!(items.len(), 4);
    assert_eq!(
        items[0],
        json!({
            "itemId": 1,
            "itemName": "Suitcase 250",
            "price": 50,
            "initialAvailableQuantity": 4
        })
    );
}

#[tokio::test]
async fn test_product_detail_includes_live_stock() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/list_products/3").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "itemId": 3,
            "itemName": "Suitcase 650",
            "price": 350,
            "initialAvailableQuantity": 2,
            "currentQuantity": 2
        })
    );
}

#[tokio::test]
async fn test_unknown_product() {
    let app = helpers::TestApp::new().await;

    for path in ["/list_products/99", "/list_products/abc", "/reserve_product/99"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "status": "Product not found" }));
    }

    assert_eq!(app.state.queue.stats().inactive, 0);
    assert!(app.state.queue.get(1).is_none());
}

#[tokio::test]
async fn test_reserve_until_out_of_stock() {
    let app = helpers::TestApp::new().await;

    for expected in [3, 2, 1, 0] {
        let response = app.get("/reserve_product/1").await;
        assert_eq!(
            response.body,
            json!({ "status": "Reservation confirmed", "itemId": 1 })
        );

        let detail = app.get("/list_products/1").await;
        assert_eq!(detail.body["currentQuantity"], expected);
    }

    let response = app.get("/reserve_product/1").await;
    assert_eq!(
        response.body,
        json!({ "status": "Not enough stock available", "itemId": 1 })
    );

    let detail = app.get("/list_products/1").await;
    assert_eq!(detail.body["currentQuantity"], 0);
}

#[tokio::test]
async fn test_drained_item_does_not_block_others() {
    let app = helpers::TestApp::new().await;

    for _ in 0..3 {
        app.get("/reserve_product/3").await;
    }
    let response = app.get("/reserve_product/3").await;
    assert_eq!(response.body["status"], "Not enough stock available");

    let response = app.get("/reserve_product/2").await;
    assert_eq!(
        response.body,
        json!({ "status": "Reservation confirmed", "itemId": 2 })
    );

    let detail = app.get("/list_products/2").await;
    assert_eq!(detail.body["currentQuantity"], 9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reservations_confirm_exactly_stock() {
    let app = helpers::TestApp::new().await;

    let responses =
        futures::future::join_all((0..12).map(|_| app.get("/reserve_product/4"))).await;

    let confirmed = responses
        .iter()
        .filter(|r| r.body["status"] == "Reservation confirmed")
        .count();
    assert_eq!(confirmed, 5);
    assert!(
        responses
            .iter()
            .all(|r| r.body["status"] != "Reservation in process")
    );

    let detail = app.get("/list_products/4").await;
    assert_eq!(detail.body["currentQuantity"], 0);
}

#[tokio::test]
async fn test_custom_catalog() {
    let mut config = AppConfig::default();
    config.inventory.products = vec![ResourceItem::new(7, "Duffel", 20, 1)];
    let app = helpers::TestApp::with_config(config).await;

    let response = app.get("/list_products").await;
    assert_eq!(response.body.as_array().map(Vec::len), Some(1));

    let response = app.get("/reserve_product/7").await;
    assert_eq!(response.body["status"], "Reservation confirmed");

    let response = app.get("/reserve_product/1").await;
    assert_eq!(response.body, json!({ "status": "Product not found" }));
}

#[tokio::test]
async fn test_store_failure_is_not_reported_as_sold_out() {
    let mut config = AppConfig::default();
    config.worker.job_retention = 1;
    let store = CounterStoreManager::from_provider(Arc::new(FlakyStore::default()));
    let app = helpers::TestApp::with_store(config, store).await;

    // Each job is evicted as soon as the next one settles; the outcome must
    // still come from the job itself.
    for _ in 0..3 {
        let response = app.get("/reserve_product/1").await;
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.body["error"], "STORE_UNAVAILABLE");
        assert_eq!(response.body["message"], "Redis error: connection reset");
    }

    let detail = app.get("/list_products/1").await;
    assert_eq!(detail.body["currentQuantity"], 4);
    assert_eq!(app.state.queue.stats().failed, 1);
}
