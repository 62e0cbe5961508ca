//! Reservation worker and job queue configuration.

use serde::{Deserialize, Serialize};

/// Reservation worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Start the seat worker at boot instead of waiting for `GET /process`.
    #[serde(default)]
    pub autostart_seats: bool,
    /// Maximum number of pending jobs per job type.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Number of finished jobs kept for status lookups.
    #[serde(default = "default_job_retention")]
    pub job_retention: usize,
    /// How long a product reservation waits for its job outcome.
    #[serde(default = "default_confirm_timeout")]
    pub confirm_timeout_ms: u64,
    /// How long shutdown waits for the worker tasks to stop.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            autostart_seats: false,
            queue_capacity: default_queue_capacity(),
            job_retention: default_job_retention(),
            confirm_timeout_ms: default_confirm_timeout(),
            shutdown_grace_seconds: default_shutdown_grace(),
        }
    }
}

fn default_queue_capacity() -> usize {
    10_000
}

fn default_job_retention() -> usize {
    1024
}

fn default_confirm_timeout() -> u64 {
    5000
}

fn default_shutdown_grace() -> u64 {
    10
}
