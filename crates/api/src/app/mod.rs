//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: history source + engine invocation
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and mapping to engine types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::history::HistorySource;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(history: Arc<dyn HistorySource>) -> Router {
    let services = Arc::new(services::AppServices::new(history));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::cors_headers)))
}
