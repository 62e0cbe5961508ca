//! Reservation job model and state machine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Monotonic job identifier assigned by the queue, starting at 1.
pub type JobId = u64;

/// Job type processed by the seat worker.
pub const SEAT_JOB_TYPE: &str = "reserve_seat";

/// Job type processed by the product worker.
pub const PRODUCT_JOB_TYPE: &str = "reserve_product";

/// Lifecycle state of a reservation job.
///
/// `inactive -> active -> complete | failed`. Terminal states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Enqueued, waiting for the worker.
    Inactive,
    /// Picked up by the worker.
    Active,
    /// The counter was decremented.
    Complete,
    /// The reservation was rejected or the store failed.
    Failed,
}

impl JobState {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a job reserves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    /// Counter store key to decrement.
    pub counter_key: String,
    /// Free-form metadata echoed back in status lookups (e.g. `itemId`).
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

impl ReservationPayload {
    /// Payload with no metadata.
    pub fn new(counter_key: impl Into<String>) -> Self {
        Self {
            counter_key: counter_key.into(),
            metadata: Value::Null,
        }
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Snapshot of a reservation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationJob {
    /// Queue-assigned identifier.
    pub id: JobId,
    /// Job type, selecting the processor.
    #[serde(rename = "type")]
    pub job_type: String,
    /// What to reserve.
    pub payload: ReservationPayload,
    /// Current state.
    pub state: JobState,
    /// Result reported by the handler on completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Present iff `state` is `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Enqueue time.
    pub created_at: DateTime<Utc>,
    /// Last transition time.
    pub updated_at: DateTime<Utc>,
}
