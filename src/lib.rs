pub mod config;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use config::AppConfig;
use tasks::store::TaskStore;

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    /// Document store holding the tasks collection. Injected as a trait
    /// object so tests can substitute an in-memory double.
    pub store: Arc<dyn TaskStore>,
}

impl AppContext {
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn TaskStore>) -> Self {
        Self { config, store }
    }
}
