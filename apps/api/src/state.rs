use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::resume::extractor::PdfExtractor;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend, built once at startup. Default: `LlmClient`.
    pub llm: Arc<dyn CompletionService>,
    pub extractor: PdfExtractor,
    pub sessions: SessionStore,
    pub config: Config,
}
