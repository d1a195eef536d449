use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::{CandidatePool, ProfileSink, ResumeSections, UnlockLedger};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The store collaborators are trait objects so tests can swap in-memory
/// implementations without touching handler code.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    pub pool: Arc<dyn CandidatePool>,
    pub unlocks: Arc<dyn UnlockLedger>,
    pub sections: Arc<dyn ResumeSections>,
    pub profiles: Arc<dyn ProfileSink>,
}
