//! CORS layer for the read-only reservation API.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use reshub_core::config::CorsConfig;

/// Builds the CORS layer. Every route is a `GET`, so unparseable method
/// names fall back to `GET` alone rather than an empty allow-list.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if methods.is_empty() {
        methods.push(Method::GET);
    }

    CorsLayer::new()
        .allow_origin(allowed_origins(&config.allowed_origins))
        .allow_methods(methods)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn allowed_origins(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    AllowOrigin::list(parsed)
}
