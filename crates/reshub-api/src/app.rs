//! Application builder: wires state, router and middleware into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use reshub_cache::keys;
use reshub_cache::provider::CounterStoreManager;
use reshub_core::config::AppConfig;
use reshub_core::error::AppError;
use reshub_core::result::AppResult;
use reshub_core::traits::CounterStore;
use reshub_core::types::Catalog;
use reshub_worker::jobs::ReservationJobHandler;
use reshub_worker::{GateSet, JobQueue, WorkerLauncher};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Seed the counters and assemble the reservation pipeline.
///
/// The product worker is always started here; the seat worker only when
/// `worker.autostart_seats` is set, otherwise `GET /process` starts it.
pub async fn build_state(
    config: AppConfig,
    store: CounterStoreManager,
    shutdown_rx: watch::Receiver<bool>,
) -> AppResult<AppState> {
    let store = Arc::new(store);
    let gates = Arc::new(GateSet::new());

    // ── Step 1: Seed counters ────────────────────────────────────
    seed_counters(&config, store.as_ref(), &gates).await?;

    // ── Step 2: Queue and workers ────────────────────────────────
    let queue = Arc::new(JobQueue::new(&config.worker));
    let counters: Arc<dyn CounterStore> = store.clone();

    let seat_worker = Arc::new(WorkerLauncher::new(
        Arc::clone(&queue),
        Arc::new(ReservationJobHandler::seats(
            Arc::clone(&counters),
            Arc::clone(&gates),
        )),
        shutdown_rx.clone(),
    ));
    let product_worker = Arc::new(WorkerLauncher::new(
        Arc::clone(&queue),
        Arc::new(ReservationJobHandler::products(
            Arc::clone(&counters),
            Arc::clone(&gates),
        )),
        shutdown_rx,
    ));

    product_worker.ensure_started().await?;
    tracing::info!("Product worker started");

    if config.worker.autostart_seats {
        seat_worker.ensure_started().await?;
        tracing::info!("Seat worker started at boot");
    }

    Ok(AppState {
        catalog: Arc::new(Catalog::new(config.inventory.products.clone())),
        config: Arc::new(config),
        store,
        queue,
        gates,
        seat_worker,
        product_worker,
    })
}

/// Write the configured seat count and initial stock into the store.
async fn seed_counters(
    config: &AppConfig,
    store: &CounterStoreManager,
    gates: &GateSet,
) -> AppResult<()> {
    let seat_key = keys::available_seats();
    store.set(&seat_key, config.inventory.seats).await?;
    if config.inventory.seats == 0 {
        gates.close(&seat_key);
    }

    for item in &config.inventory.products {
        let key = keys::item(item.item_id);
        store.set(&key, item.initial_available_quantity).await?;
        if item.initial_available_quantity == 0 {
            gates.close(&key);
        }
    }

    tracing::info!(
        seats = config.inventory.seats,
        products = config.inventory.products.len(),
        "Counters seeded"
    );
    Ok(())
}

/// Runs the ResHub server with the given configuration.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting ResHub server...");

    // ── Step 1: Initialize counter store ─────────────────────────
    tracing::info!(
        "Initializing counter store (provider: {})...",
        config.store.provider
    );
    let store = CounterStoreManager::new(&config.store).await?;

    // ── Step 2: Shutdown channel, state and workers ──────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let grace = Duration::from_secs(config.worker.shutdown_grace_seconds);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, store, shutdown_rx).await?;
    let seat_worker = Arc::clone(&state.seat_worker);
    let product_worker = Arc::clone(&state.product_worker);

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("ResHub server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 4: Wait for workers ─────────────────────────────────
    tracing::info!("Waiting for workers to stop...");
    product_worker.join(grace).await;
    seat_worker.join(grace).await;

    tracing::info!("ResHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
