pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs/analyze", post(handlers::handle_analyze_job))
        .route("/api/v1/candidates/search", post(handlers::handle_search))
        .route("/api/v1/candidates/match", post(handlers::handle_job_match))
        .route(
            "/api/v1/admin/backfill/profiles",
            post(handlers::handle_profile_backfill),
        )
        .with_state(state)
}
