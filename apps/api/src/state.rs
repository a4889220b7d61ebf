use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; analyses then fail with a configuration error.
    pub llm: Option<Arc<dyn CompletionClient>>,
    pub config: Config,
}
