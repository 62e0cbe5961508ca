//! Seat reservation handlers.

use axum::Extension;
use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use reshub_cache::keys;
use reshub_core::error::AppError;
use reshub_core::traits::CounterStore;
use reshub_worker::ReservationPayload;
use reshub_worker::job::SEAT_JOB_TYPE;

use crate::dto::response::{
    QUEUE_PROCESSING, RESERVATION_BLOCKED, RESERVATION_IN_PROCESS, SeatsResponse, StatusResponse,
};
use crate::error::ApiResult;
use crate::middleware::logging::EnqueuedJob;
use crate::state::AppState;

/// GET /available_seats
pub async fn available_seats(State(state): State<AppState>) -> ApiResult<Json<SeatsResponse>> {
    let seats = state
        .store
        .get(&keys::available_seats())
        .await?
        .unwrap_or(state.config.inventory.seats);

    Ok(Json(SeatsResponse {
        number_of_available_seats: seats,
    }))
}

/// GET /reserve_seat
///
/// Enqueues a seat job and returns immediately; the outcome is only
/// visible through `/available_seats` or `/jobs/{job_id}`.
pub async fn reserve_seat(State(state): State<AppState>) -> ApiResult<Response> {
    let key = keys::available_seats();
    if !state.gates.is_open(&key) {
        return Err(AppError::insufficient_resource(RESERVATION_BLOCKED).into());
    }

    let job = state
        .queue
        .enqueue(SEAT_JOB_TYPE, ReservationPayload::new(key))
        .await?;

    Ok((
        Extension(EnqueuedJob(job.id)),
        Json(StatusResponse::new(RESERVATION_IN_PROCESS)),
    )
        .into_response())
}

/// GET /process
pub async fn process(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    if state.seat_worker.ensure_started().await? {
        tracing::info!("Seat worker started");
    }
    Ok(Json(StatusResponse::new(QUEUE_PROCESSING)))
}
