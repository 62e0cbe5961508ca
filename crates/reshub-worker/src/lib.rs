//! Reservation pipeline for ResHub.
//!
//! This crate provides:
//! - A typed, FIFO job queue with one consumer per job type
//! - Reservation gates that stop new jobs once a counter is drained
//! - A worker runner that processes one lane sequentially
//! - A start-once launcher so a processor is never registered twice
//! - The reservation job handler performing the atomic decrement

pub mod gate;
pub mod handler;
pub mod job;
pub mod jobs;
pub mod launcher;
pub mod queue;
pub mod runner;

pub use gate::{GateSet, ReservationGate};
pub use job::{JobId, JobState, ReservationJob, ReservationPayload};
pub use launcher::WorkerLauncher;
pub use queue::JobQueue;
pub use runner::WorkerRunner;
