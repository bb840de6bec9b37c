use crate::config::Config;
use crate::prompt_builder::strategies::StrategyRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup; the builder resolves strategies through the same registry.
    pub strategies: &'static StrategyRegistry,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            strategies: StrategyRegistry::global(),
        }
    }
}
