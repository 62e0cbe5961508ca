//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use reshub_cache::provider::CounterStoreManager;
use reshub_core::config::AppConfig;
use reshub_core::types::Catalog;
use reshub_worker::{GateSet, JobQueue, WorkerLauncher};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Immutable product catalog
    pub catalog: Arc<Catalog>,

    // ── Infrastructure ───────────────────────────────────────
    /// Counter store (Redis or in-memory)
    pub store: Arc<CounterStoreManager>,

    // ── Reservation pipeline ─────────────────────────────────
    /// Typed job queue
    pub queue: Arc<JobQueue>,
    /// Reservation gates, one per counter key
    pub gates: Arc<GateSet>,
    /// Seat worker, started by `GET /process`
    pub seat_worker: Arc<WorkerLauncher>,
    /// Product worker, started at boot
    pub product_worker: Arc<WorkerLauncher>,
}
