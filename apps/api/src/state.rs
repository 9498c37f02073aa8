use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::portfolio::store::PortfolioStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LlmClient,
    /// Flat-file record store. Holds only the path and the writer lock; data is read per request.
    pub store: PortfolioStore,
}
