//! Worker runner: drains one job type's lane, one job at a time.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing;

use crate::handler::{JobExecutionError, JobHandler};
use crate::job::JobId;
use crate::queue::JobQueue;

/// Sequential consumer for a single job type.
///
/// Jobs are awaited one after another, so two jobs of the same type never
/// run concurrently.
#[derive(Debug)]
pub struct WorkerRunner {
    /// Job queue for state transitions
    queue: Arc<JobQueue>,
    /// The processor for this lane
    handler: Arc<dyn JobHandler>,
    /// Consumer end of the lane
    receiver: mpsc::Receiver<JobId>,
    /// Worker identifier
    worker_id: String,
}

impl WorkerRunner {
    /// Create a new worker runner
    pub fn new(
        queue: Arc<JobQueue>,
        handler: Arc<dyn JobHandler>,
        receiver: mpsc::Receiver<JobId>,
        worker_id: String,
    ) -> Self {
        Self {
            queue,
            handler,
            receiver,
            worker_id,
        }
    }

    /// Run until the cancel signal flips or the lane closes
    pub async fn run(mut self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Worker '{}' started for job type '{}'",
            self.worker_id,
            self.handler.job_type()
        );

        if *cancel.borrow() {
            tracing::info!("Worker '{}' cancelled before start", self.worker_id);
            return;
        }

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Worker '{}' received shutdown signal", self.worker_id);
                        break;
                    }
                }
                next = self.receiver.recv() => {
                    match next {
                        Some(job_id) => self.process(job_id).await,
                        None => {
                            tracing::info!("Worker '{}' lane closed", self.worker_id);
                            break;
                        }
                    }
                }
            }
        }

        self.receiver.close();
        tracing::info!("Worker '{}' shut down complete", self.worker_id);
    }

    /// Run one job to a terminal state
    async fn process(&self, job_id: JobId) {
        let job = match self.queue.activate(job_id) {
            Ok(job) => job,
            Err(e) => {
                tracing::error!("Failed to activate job {}: {}", job_id, e);
                return;
            }
        };

        tracing::info!(
            "Processing job: id={}, type='{}', key='{}'",
            job.id,
            job.job_type,
            job.payload.counter_key
        );

        match self.handler.execute(&job).await {
            Ok(result) => {
                if let Err(e) = self.queue.complete(job_id, result).await {
                    tracing::error!("Failed to mark job {} as completed: {}", job_id, e);
                    return;
                }
                tracing::info!("Job {} completed successfully", job_id);
            }
            Err(err) => {
                match &err {
                    JobExecutionError::Rejected(reason) => {
                        tracing::warn!("Job {} rejected: {}", job_id, reason);
                    }
                    JobExecutionError::Internal(e) if e.is_store_failure() => {
                        tracing::error!("Job {} failed, counter store unavailable: {}", job_id, e);
                    }
                    JobExecutionError::Internal(e) => {
                        tracing::error!("Job {} internal error: {}", job_id, e);
                    }
                }
                if let Err(e) = self.queue.fail(job_id, &err.reason()).await {
                    tracing::error!("Failed to mark job {} as failed: {}", job_id, e);
                }
            }
        }
    }
}
