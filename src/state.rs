use std::sync::Arc;

use crate::config::AppConfig;
use crate::resources::{Item, Pantry};
use crate::services::resource_service::ResourceService;
use crate::services::user_service::UserService;
use crate::store::DocumentStore;

/// Shared application state: the injected store handle and configuration.
/// Constructed once in `main` (or a test harness) and cloned into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub fn items(&self) -> ResourceService<Item> {
        ResourceService::new(self.store.clone())
    }

    pub fn pantries(&self) -> ResourceService<Pantry> {
        ResourceService::new(self.store.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.store.clone())
    }
}
