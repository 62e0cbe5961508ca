//! Integration tests for the seat reservation flow.

mod helpers;

use http::StatusCode;
use serde_json::json;

use reshub_core::config::AppConfig;
use reshub_worker::JobState;

#[tokio::test]
async fn test_initial_seat_count() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/available_seats").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "numberOfAvailableSeats": 50 }));
}

#[tokio::test]
async fn test_drain_all_seats_then_block() {
    let app = helpers::TestApp::new().await;

    for _ in 0..50 {
        let response = app.get("/reserve_seat").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "status": "Reservation in process" }));
    }

    let response = app.get("/process").await;
    assert_eq!(response.body, json!({ "status": "Queue processing" }));

    // The lane is FIFO and sequential, so the last job settling means all did.
    assert_eq!(app.settle(50).await, JobState::Complete);

    let response = app.get("/available_seats").await;
    assert_eq!(response.body, json!({ "numberOfAvailableSeats": 0 }));

    let response = app.get("/reserve_seat").await;
    assert_eq!(response.body, json!({ "status": "Reservation are blocked" }));
    assert_eq!(app.state.queue.stats().complete, 50);
}

#[tokio::test]
async fn test_jobs_wait_until_process_is_called() {
    let app = helpers::TestApp::new().await;

    app.get("/reserve_seat").await;

    let job = app.get("/jobs/1").await;
    assert_eq!(job.body["state"], "inactive");
    assert_eq!(job.body["type"], "reserve_seat");

    let response = app.get("/available_seats").await;
    assert_eq!(response.body, json!({ "numberOfAvailableSeats": 50 }));

    app.get("/process").await;
    assert_eq!(app.settle(1).await, JobState::Complete);

    let response = app.get("/available_seats").await;
    assert_eq!(response.body, json!({ "numberOfAvailableSeats": 49 }));
}

#[tokio::test]
async fn test_repeated_process_runs_each_job_once() {
    let app = helpers::TestApp::new().await;

    for _ in 0..10 {
        app.get("/reserve_seat").await;
    }

    let responses = futures::future::join_all((0..3).map(|_| app.get("/process"))).await;
    for response in responses {
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "status": "Queue processing" }));
    }
    app.get("/process").await;

    assert_eq!(app.settle(10).await, JobState::Complete);

    let response = app.get("/available_seats").await;
    assert_eq!(response.body, json!({ "numberOfAvailableSeats": 40 }));
    assert_eq!(app.state.queue.stats().complete, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_never_oversell() {
    let mut config = AppConfig::default();
    config.inventory.seats = 5;
    let app = helpers::TestApp::with_config(config).await;

    let responses = futures::future::join_all((0..20).map(|_| app.get("/reserve_seat"))).await;
    assert!(responses.iter().all(|r| r.status == StatusCode::OK));

    app.get("/process").await;
    assert_eq!(app.settle(20).await, JobState::Failed);

    let response = app.get("/available_seats").await;
    assert_eq!(response.body, json!({ "numberOfAvailableSeats": 0 }));

    let stats = app.state.queue.stats();
    assert_eq!(stats.complete, 5);
    assert_eq!(stats.failed, 15);

    let failed = app.get("/jobs/20").await;
    assert_eq!(failed.body["failureReason"], "Not enough seats available");
}

#[tokio::test]
async fn test_autostart_processes_without_process_call() {
    let mut config = AppConfig::default();
    config.worker.autostart_seats = true;
    let app = helpers::TestApp::with_config(config).await;

    app.get("/reserve_seat").await;
    assert_eq!(app.settle(1).await, JobState::Complete);

    let response = app.get("/available_seats").await;
    assert_eq!(response.body, json!({ "numberOfAvailableSeats": 49 }));
}

#[tokio::test]
async fn test_full_queue_rejects_reservation() {
    let mut config = AppConfig::default();
    config.worker.queue_capacity = 2;
    let app = helpers::TestApp::with_config(config).await;

    app.get("/reserve_seat").await;
    app.get("/reserve_seat").await;
    let response = app.get("/reserve_seat").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body, json!({ "status": "Reservation failed" }));
}

#[tokio::test]
async fn test_zero_seats_blocks_immediately() {
    let mut config = AppConfig::default();
    config.inventory.seats = 0;
    let app = helpers::TestApp::with_config(config).await;

    let response = app.get("/reserve_seat").await;
    assert_eq!(response.body, json!({ "status": "Reservation are blocked" }));
    assert!(app.state.queue.get(1).is_none());
}
