//! Reservation job handler: the atomic decrement behind every reservation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use reshub_core::traits::counter::{CounterStore, DecrementOutcome};

use crate::gate::GateSet;
use crate::handler::{JobExecutionError, JobHandler};
use crate::job::{PRODUCT_JOB_TYPE, ReservationJob, SEAT_JOB_TYPE};

/// Failure reason recorded when the seat counter is drained.
pub const SEATS_EXHAUSTED: &str = "Not enough seats available";

/// Failure reason recorded when an item's stock is drained.
pub const STOCK_EXHAUSTED: &str = "Not enough stock available";

/// Decrements the job's counter and closes its gate once it hits zero.
#[derive(Debug)]
pub struct ReservationJobHandler {
    /// Job type served
    job_type: String,
    /// Counter store holding availability
    store: Arc<dyn CounterStore>,
    /// Gates shared with the API
    gates: Arc<GateSet>,
    /// Failure reason for a drained counter
    exhausted_reason: String,
}

impl ReservationJobHandler {
    /// Create a handler for an arbitrary job type
    pub fn new(
        job_type: impl Into<String>,
        store: Arc<dyn CounterStore>,
        gates: Arc<GateSet>,
        exhausted_reason: impl Into<String>,
    ) -> Self {
        Self {
            job_type: job_type.into(),
            store,
            gates,
            exhausted_reason: exhausted_reason.into(),
        }
    }

    /// Handler for `reserve_seat` jobs
    pub fn seats(store: Arc<dyn CounterStore>, gates: Arc<GateSet>) -> Self {
        Self::new(SEAT_JOB_TYPE, store, gates, SEATS_EXHAUSTED)
    }

    /// Handler for `reserve_product` jobs
    pub fn products(store: Arc<dyn CounterStore>, gates: Arc<GateSet>) -> Self {
        Self::new(PRODUCT_JOB_TYPE, store, gates, STOCK_EXHAUSTED)
    }
}

#[async_trait]
impl JobHandler for ReservationJobHandler {
    fn job_type(&self) -> &str {
        &self.job_type
    }

    async fn execute(&self, job: &ReservationJob) -> Result<Option<Value>, JobExecutionError> {
        let key = job.payload.counter_key.as_str();

        let outcome = self.store.decrement_if_positive(key).await?;
        if outcome.exhausted() && self.gates.close(key) {
            tracing::info!("Counter '{}' drained, reservations closed", key);
        }

        match outcome {
            DecrementOutcome::Decremented { remaining } => {
                Ok(Some(serde_json::json!({ "remaining": remaining })))
            }
            DecrementOutcome::Insufficient => {
                Err(JobExecutionError::Rejected(self.exhausted_reason.clone()))
            }
        }
    }
}
