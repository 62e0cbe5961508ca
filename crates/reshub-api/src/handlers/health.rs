//! Health check handler.

use axum::Json;
use axum::extract::State;

use reshub_core::traits::CounterStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_ok = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!(error = %e, "Counter store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if store_ok { "ok" } else { "degraded" }.to_string(),
        store: if store_ok { "connected" } else { "unavailable" }.to_string(),
        queue: state.queue.stats(),
    })
}
