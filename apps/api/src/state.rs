use std::sync::Arc;

use crate::config::Config;
use crate::store::PortfolioStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production, in-memory in tests. Chosen at startup via `STORE_BACKEND`.
    pub store: Arc<dyn PortfolioStore>,
    pub config: Config,
}
