use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::SeasonStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SeasonStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: SeasonStore, config: AppConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
