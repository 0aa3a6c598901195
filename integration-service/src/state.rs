//! Application state for integration service.

use std::sync::Arc;

use common::config::AppConfig;

use crate::aws_oidc::DatabaseLister;
use crate::service::IntegrationService;
use crate::store::IntegrationStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<IntegrationStore>,
    pub lister: Arc<dyn DatabaseLister>,
}

impl AppState {
    /// Creates a new application state with an empty store.
    pub fn new(config: AppConfig, lister: Arc<dyn DatabaseLister>) -> Self {
        Self {
            config,
            store: Arc::new(IntegrationStore::new()),
            lister,
        }
    }

    /// Builds the integration service over the shared store.
    pub fn integration_service(&self) -> IntegrationService {
        IntegrationService::new(self.store.clone(), self.lister.clone(), self.config.page_limit)
    }
}
