//! Route definitions for the ResHub HTTP API.
//!
//! Paths are mounted at the root to stay compatible with existing clients.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with every route and the request logging middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(seat_routes())
        .merge(product_routes())
        .merge(job_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Seat endpoints: count, reserve, start worker
fn seat_routes() -> Router<AppState> {
    Router::new()
        .route("/available_seats", get(handlers::seat::available_seats))
        .route("/reserve_seat", get(handlers::seat::reserve_seat))
        .route("/process", get(handlers::seat::process))
}

/// Product endpoints: catalog, detail, reserve
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/list_products", get(handlers::product::list_products))
        .route(
            "/list_products/{item_id}",
            get(handlers::product::get_product),
        )
        .route(
            "/reserve_product/{item_id}",
            get(handlers::product::reserve_product),
        )
}

fn job_routes() -> Router<AppState> {
    Router::new().route("/jobs/{job_id}", get(handlers::job::get_job))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
