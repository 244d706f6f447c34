use axum::{Router, routing::post};

pub mod calculator;
pub mod history;
pub mod system;

/// Router for all planning endpoints.
pub fn router() -> Router {
    Router::new()
        .route(
            "/shipping-calculator",
            post(calculator::calculate).options(calculator::preflight),
        )
        .route("/history", post(history::ingest))
}
