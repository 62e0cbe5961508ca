//! Job queue for enqueuing and dequeuing reservation jobs.
//!
//! Each job type owns one bounded lane. The consumer end of a lane can be
//! handed out exactly once, which is what keeps processing of a type
//! single-consumer. Job records live in a table keyed by id so the API can
//! look them up; finished jobs are kept up to the retention limit.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, mpsc, watch};
use tracing;

use reshub_core::config::WorkerConfig;
use reshub_core::error::AppError;
use reshub_core::result::AppResult;

use crate::job::{JobId, JobState, ReservationJob, ReservationPayload};

/// Lane for one job type.
#[derive(Debug)]
struct Lane {
    tx: mpsc::Sender<JobId>,
    /// Taken by the single registered processor.
    rx: Option<mpsc::Receiver<JobId>>,
}

impl Lane {
    fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self { tx, rx: Some(rx) }
    }
}

/// A job record plus the channel that publishes every new snapshot.
#[derive(Debug)]
struct JobEntry {
    job: ReservationJob,
    notify: watch::Sender<ReservationJob>,
}

/// In-process job queue.
#[derive(Debug)]
pub struct JobQueue {
    /// Next id to hand out.
    next_id: AtomicU64,
    /// Lanes by job type. Id assignment and lane append happen under this lock.
    lanes: Mutex<HashMap<String, Lane>>,
    /// Known jobs by id.
    jobs: DashMap<JobId, JobEntry>,
    /// Finished job ids, oldest first.
    finished: Mutex<VecDeque<JobId>>,
    /// Maximum pending jobs per lane.
    capacity: usize,
    /// Maximum finished jobs kept.
    retention: usize,
}

impl JobQueue {
    /// Create a new job queue
    pub fn new(config: &WorkerConfig) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            lanes: Mutex::new(HashMap::new()),
            jobs: DashMap::new(),
            finished: Mutex::new(VecDeque::new()),
            capacity: config.queue_capacity.max(1),
            retention: config.job_retention.max(1),
        }
    }

    /// Enqueue a new job. Returns as soon as the job is recorded; the
    /// processor runs it later.
    pub async fn enqueue(
        &self,
        job_type: &str,
        payload: ReservationPayload,
    ) -> AppResult<ReservationJob> {
        self.enqueue_watched(job_type, payload)
            .await
            .map(|(job, _)| job)
    }

    /// Enqueue a new job and subscribe to it before any processor can see it.
    ///
    /// The receiver keeps the last snapshot after the job is evicted, so the
    /// outcome can be read regardless of retention.
    pub async fn enqueue_watched(
        &self,
        job_type: &str,
        payload: ReservationPayload,
    ) -> AppResult<(ReservationJob, watch::Receiver<ReservationJob>)> {
        let mut lanes = self.lanes.lock().await;
        let lane = lanes
            .entry(job_type.to_string())
            .or_insert_with(|| Lane::new(self.capacity));

        let permit = lane.tx.try_reserve().map_err(|e| match e {
            TrySendError::Full(()) => AppError::queue_enqueue(format!(
                "Queue for '{job_type}' is full ({} pending jobs)",
                self.capacity
            )),
            TrySendError::Closed(()) => {
                AppError::queue_enqueue(format!("Queue for '{job_type}' is shut down"))
            }
        })?;

        let now = Utc::now();
        let job = ReservationJob {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            job_type: job_type.to_string(),
            payload,
            state: JobState::Inactive,
            result: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        };

        let (notify, watcher) = watch::channel(job.clone());
        self.jobs.insert(
            job.id,
            JobEntry {
                job: job.clone(),
                notify,
            },
        );
        permit.send(job.id);
        drop(lanes);

        tracing::debug!(
            "Enqueued job: id={}, type='{}', key='{}'",
            job.id,
            job.job_type,
            job.payload.counter_key
        );

        Ok((job, watcher))
    }

    /// Hand out the consumer end of a job type's lane.
    ///
    /// Only one processor may exist per type; a second call fails with a
    /// duplicate-processor error.
    pub async fn register_processor(&self, job_type: &str) -> AppResult<mpsc::Receiver<JobId>> {
        let mut lanes = self.lanes.lock().await;
        let lane = lanes
            .entry(job_type.to_string())
            .or_insert_with(|| Lane::new(self.capacity));

        let rx = lane
            .rx
            .take()
            .ok_or_else(|| AppError::duplicate_processor(job_type))?;

        tracing::info!("Registered processor for job type '{}'", job_type);
        Ok(rx)
    }

    /// Snapshot of a job, if it is still retained.
    pub fn get(&self, id: JobId) -> Option<ReservationJob> {
        self.jobs.get(&id).map(|entry| entry.job.clone())
    }

    /// Watch a job's snapshots.
    pub fn subscribe(&self, id: JobId) -> Option<watch::Receiver<ReservationJob>> {
        self.jobs.get(&id).map(|entry| entry.notify.subscribe())
    }

    /// Wait until a retained job reaches a terminal state.
    pub async fn wait_for(&self, id: JobId) -> AppResult<ReservationJob> {
        let watcher = self
            .subscribe(id)
            .ok_or_else(|| AppError::not_found(format!("Job {id} not found")))?;
        Self::settled(watcher).await
    }

    /// Wait on a subscription until the job reaches a terminal state and
    /// return that snapshot.
    pub async fn settled(mut watcher: watch::Receiver<ReservationJob>) -> AppResult<ReservationJob> {
        let job = watcher
            .wait_for(|job| job.state.is_terminal())
            .await
            .map_err(|_| AppError::internal("Job was dropped before finishing"))?;
        Ok(job.clone())
    }

    /// Mark a job as picked up by its processor.
    pub fn activate(&self, id: JobId) -> AppResult<ReservationJob> {
        let job = self.transition(id, JobState::Inactive, JobState::Active, |_| {})?;
        tracing::debug!("Dequeued job: id={}, type='{}'", job.id, job.job_type);
        Ok(job)
    }

    /// Mark a job as completed successfully
    pub async fn complete(&self, id: JobId, result: Option<Value>) -> AppResult<()> {
        self.transition(id, JobState::Active, JobState::Complete, |job| {
            job.result = result;
        })?;
        self.retire(id).await;

        tracing::debug!("Job completed: id={}", id);
        Ok(())
    }

    /// Mark a job as failed
    pub async fn fail(&self, id: JobId, reason: &str) -> AppResult<()> {
        self.transition(id, JobState::Active, JobState::Failed, |job| {
            job.failure_reason = Some(reason.to_string());
        })?;
        self.retire(id).await;

        tracing::debug!("Job failed: id={}, reason='{}'", id, reason);
        Ok(())
    }

    /// Get queue statistics over retained jobs
    pub fn stats(&self) -> QueueStats {
        let mut stats = QueueStats::default();
        for entry in self.jobs.iter() {
            match entry.job.state {
                JobState::Inactive => stats.inactive += 1,
                JobState::Active => stats.active += 1,
                JobState::Complete => stats.complete += 1,
                JobState::Failed => stats.failed += 1,
            }
        }
        stats
    }

    fn transition(
        &self,
        id: JobId,
        from: JobState,
        to: JobState,
        update: impl FnOnce(&mut ReservationJob),
    ) -> AppResult<ReservationJob> {
        let mut entry = self
            .jobs
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Job {id} not found")))?;

        if entry.job.state != from {
            return Err(AppError::conflict(format!(
                "Job {id} cannot move from {} to {to}",
                entry.job.state
            )));
        }

        update(&mut entry.job);
        entry.job.state = to;
        entry.job.updated_at = Utc::now();
        entry.notify.send_replace(entry.job.clone());
        Ok(entry.job.clone())
    }

    async fn retire(&self, id: JobId) {
        let mut finished = self.finished.lock().await;
        finished.push_back(id);
        while finished.len() > self.retention {
            if let Some(evicted) = finished.pop_front() {
                self.jobs.remove(&evicted);
            }
        }
    }
}

/// Queue statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// Jobs waiting for their processor
    pub inactive: u64,
    /// Jobs being processed
    pub active: u64,
    /// Retained completed jobs
    pub complete: u64,
    /// Retained failed jobs
    pub failed: u64,
}
