//! Product catalog and stock reservation handlers.

use std::time::Duration;

use axum::Extension;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use reshub_cache::keys;
use reshub_core::error::AppError;
use reshub_core::traits::CounterStore;
use reshub_core::types::ResourceItem;
use reshub_worker::job::PRODUCT_JOB_TYPE;
use reshub_worker::jobs::reservation::STOCK_EXHAUSTED;
use reshub_worker::{JobQueue, JobState, ReservationJob, ReservationPayload};

use crate::dto::response::{
    NOT_ENOUGH_STOCK, PRODUCT_NOT_FOUND, ProductDetailResponse, ProductStatusResponse,
    RESERVATION_CONFIRMED, RESERVATION_IN_PROCESS, StatusResponse,
};
use crate::error::ApiResult;
use crate::middleware::logging::EnqueuedJob;
use crate::state::AppState;

/// GET /list_products
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<ResourceItem>> {
    Json(state.catalog.items().to_vec())
}

/// GET /list_products/{item_id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Response> {
    let Some(item) = state.catalog.lookup(&item_id) else {
        return Ok(Json(StatusResponse::new(PRODUCT_NOT_FOUND)).into_response());
    };

    let current_quantity = state
        .store
        .get(&keys::item(item.item_id))
        .await?
        .unwrap_or(item.initial_available_quantity);

    Ok(Json(ProductDetailResponse {
        item: item.clone(),
        current_quantity,
    })
    .into_response())
}

/// GET /reserve_product/{item_id}
///
/// Enqueues a product job and blocks for at most `worker.confirm_timeout_ms`
/// (5000 ms by default) waiting for the worker to settle it. A job still
/// pending after that bound answers "Reservation in process".
pub async fn reserve_product(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Response> {
    let Some(item) = state.catalog.lookup(&item_id) else {
        return Ok(Json(StatusResponse::new(PRODUCT_NOT_FOUND)).into_response());
    };
    let item_id = item.item_id;

    let key = keys::item(item_id);
    if !state.gates.is_open(&key) {
        return Ok(Json(ProductStatusResponse::new(NOT_ENOUGH_STOCK, item_id)).into_response());
    }

    let payload =
        ReservationPayload::new(key).with_metadata(serde_json::json!({ "itemId": item_id }));
    let (job, watcher) = state
        .queue
        .enqueue_watched(PRODUCT_JOB_TYPE, payload)
        .await?;

    let timeout = Duration::from_millis(state.config.worker.confirm_timeout_ms);
    let status = match tokio::time::timeout(timeout, JobQueue::settled(watcher)).await {
        Ok(settled) => settled_status(&settled?)?,
        Err(_) => {
            tracing::debug!(job_id = job.id, "Product reservation still pending");
            RESERVATION_IN_PROCESS
        }
    };

    Ok((
        Extension(EnqueuedJob(job.id)),
        Json(ProductStatusResponse::new(status, item_id)),
    )
        .into_response())
}

/// Map a terminal job snapshot to the client-facing status.
fn settled_status(job: &ReservationJob) -> Result<&'static str, AppError> {
    if job.state == JobState::Complete {
        return Ok(RESERVATION_CONFIRMED);
    }

    // A failure other than a drained counter means the store broke mid-job.
    match job.failure_reason.as_deref() {
        Some(reason) if reason != STOCK_EXHAUSTED => {
            Err(AppError::store_unavailable(reason.to_string()))
        }
        _ => Ok(NOT_ENOUGH_STOCK),
    }
}
