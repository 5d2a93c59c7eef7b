use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Db;

/// Shared application state: the store handle and the startup configuration.
/// Constructed once in main and passed into the router; no ambient singletons.
#[derive(Clone)]
pub struct AppContext {
    pub db: Db,
    pub config: Arc<AppConfig>,
}

impl AppContext {
    pub fn new(db: Db, config: AppConfig) -> Self {
        Self { db, config: Arc::new(config) }
    }
}
