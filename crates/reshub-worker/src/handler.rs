//! Job handler trait implemented by queue processors.

use async_trait::async_trait;
use serde_json::Value;

use reshub_core::error::AppError;

use crate::job::ReservationJob;

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Get the job type this handler processes
    fn job_type(&self) -> &str;

    /// Execute the job. `Ok` completes it with an optional result.
    async fn execute(&self, job: &ReservationJob) -> Result<Option<Value>, JobExecutionError>;
}

/// Error from job execution. Either way the job ends `failed`; jobs are
/// never retried.
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Business rejection, e.g. the counter is drained
    #[error("Job rejected: {0}")]
    Rejected(String),

    /// Infrastructure error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

impl JobExecutionError {
    /// Reason recorded on the failed job.
    pub fn reason(&self) -> String {
        match self {
            Self::Rejected(reason) => reason.clone(),
            Self::Internal(err) => err.message.clone(),
        }
    }
}
