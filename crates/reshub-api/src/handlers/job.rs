//! Job status lookup.

use axum::Json;
use axum::extract::{Path, State};

use reshub_core::error::AppError;
use reshub_worker::{JobId, ReservationJob};

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /jobs/{job_id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<ReservationJob>> {
    let job = job_id
        .parse::<JobId>()
        .ok()
        .and_then(|id| state.queue.get(id))
        .ok_or_else(|| AppError::not_found(format!("Job '{job_id}' not found")))?;

    Ok(Json(job))
}
