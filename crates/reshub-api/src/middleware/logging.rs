//! Request logging middleware.
//!
//! One line per request with the matched route template, so `/reserve_product/1`
//! and `/reserve_product/2` aggregate under the same route, and the id of the
//! reservation job the request enqueued, if any.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use reshub_worker::JobId;

/// Response extension set by handlers that enqueued a reservation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnqueuedJob(pub JobId);

/// Logs method, route, status, duration and the enqueued job id.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let start = Instant::now();

    let response = next.run(request).await;

    let job_id = response.extensions().get::<EnqueuedJob>().map(|job| job.0);
    info!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        job_id = ?job_id,
        "HTTP request"
    );

    response
}
