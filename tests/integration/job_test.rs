//! Integration tests for job status lookups and the health endpoint.

mod helpers;

use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_completed_job_snapshot() {
    let app = helpers::TestApp::new().await;

    app.get("/reserve_product/2").await;

    let response = app.get("/jobs/1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], 1);
    assert_eq!(response.body["type"], "reserve_product");
    assert_eq!(response.body["state"], "complete");
    assert_eq!(response.body["payload"]["counterKey"], "item.2");
    assert_eq!(response.body["payload"]["metadata"], json!({ "itemId": 2 }));
    assert_eq!(response.body["result"], json!({ "remaining": 9 }));
    assert!(response.body.get("failureReason").is_none());
}

#[tokio::test]
async fn test_unknown_job_is_404() {
    let app = helpers::TestApp::new().await;

    for path in ["/jobs/999", "/jobs/not-a-number"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"], "NOT_FOUND");
        assert!(response.body["message"].is_string());
    }
}

#[tokio::test]
async fn test_health_reports_store_and_queue() {
    let app = helpers::TestApp::new().await;

    app.get("/reserve_seat").await;
    app.get("/reserve_product/1").await;

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "status": "ok",
            "store": "connected",
            "queue": { "inactive": 1, "active": 0, "complete": 1, "failed": 0 }
        })
    );
}

#[tokio::test]
async fn test_workers_stop_on_shutdown() {
    let app = helpers::TestApp::new().await;
    app.get("/process").await;

    app.shutdown();
    app.state
        .seat_worker
        .join(std::time::Duration::from_secs(1))
        .await;
    app.state
        .product_worker
        .join(std::time::Duration::from_secs(1))
        .await;

    // A stopped worker closes its lane, so the queue refuses new jobs.
    let response = app.get("/reserve_seat").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body, json!({ "status": "Reservation failed" }));
}
