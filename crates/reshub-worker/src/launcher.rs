//! Start-once launcher for a job type's worker.
//!
//! `GET /process` may be hit any number of times, concurrently. Only the
//! first call registers the processor and spawns the runner; the rest
//! observe the already-initialized cell and return.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, OnceCell, watch};
use tokio::task::JoinHandle;
use tracing;
use uuid::Uuid;

use reshub_core::error::AppError;
use reshub_core::result::AppResult;

use crate::handler::JobHandler;
use crate::queue::JobQueue;
use crate::runner::WorkerRunner;

/// Owns the lifecycle of one job type's worker.
#[derive(Debug)]
pub struct WorkerLauncher {
    queue: Arc<JobQueue>,
    handler: Arc<dyn JobHandler>,
    cancel: watch::Receiver<bool>,
    started: OnceCell<()>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerLauncher {
    /// Create a launcher; nothing runs until [`WorkerLauncher::ensure_started`].
    pub fn new(
        queue: Arc<JobQueue>,
        handler: Arc<dyn JobHandler>,
        cancel: watch::Receiver<bool>,
    ) -> Self {
        Self {
            queue,
            handler,
            cancel,
            started: OnceCell::new(),
            handle: Mutex::new(None),
        }
    }

    /// Job type served by this launcher.
    pub fn job_type(&self) -> &str {
        self.handler.job_type()
    }

    /// Whether the worker has been started.
    pub fn is_running(&self) -> bool {
        self.started.initialized()
    }

    /// Start the worker if it is not running yet.
    ///
    /// Returns `true` if this call started it.
    pub async fn ensure_started(&self) -> AppResult<bool> {
        let launched = AtomicBool::new(false);
        let flag = &launched;

        self.started
            .get_or_try_init(move || async move {
                let receiver = self
                    .queue
                    .register_processor(self.handler.job_type())
                    .await?;

                let worker_id = format!("worker-{}", &Uuid::new_v4().to_string()[..8]);
                let runner = WorkerRunner::new(
                    Arc::clone(&self.queue),
                    Arc::clone(&self.handler),
                    receiver,
                    worker_id,
                );

                let handle = tokio::spawn(runner.run(self.cancel.clone()));
                *self.handle.lock().await = Some(handle);
                flag.store(true, Ordering::SeqCst);
                Ok::<(), AppError>(())
            })
            .await?;

        Ok(launched.load(Ordering::SeqCst))
    }

    /// Wait for the runner to exit after the cancel signal was sent.
    pub async fn join(&self, grace: Duration) {
        let handle = self.handle.lock().await.take();
        if let Some(handle) = handle {
            if tokio::time::timeout(grace, handle).await.is_err() {
                tracing::warn!(
                    "Worker for '{}' did not stop within {:?}",
                    self.job_type(),
                    grace
                );
            }
        }
    }
}
