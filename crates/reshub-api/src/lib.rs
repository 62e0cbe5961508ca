//! # reshub-api
//!
//! HTTP API layer for ResHub built on Axum.
//!
//! Provides the seat and product reservation endpoints, job status and
//! health routes, middleware (CORS, request logging), DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
