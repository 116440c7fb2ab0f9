use std::sync::Arc;

use crate::config::Config;
use crate::summary::SummaryGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable summary backend. `DisabledSummaryGenerator` when no API key is configured.
    pub summarizer: Arc<dyn SummaryGenerator>,
}
