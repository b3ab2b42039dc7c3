//! Application state - Dependency injection container.
//!
//! Provides centralized access to the user service and infrastructure.

use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, ResourceDescriptors};
use crate::errors::AppResult;
use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization; it wires the
/// SeaORM-backed store and the configured resource descriptors.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// Loads descriptors from `config.descriptors_path` when set,
    /// falling back to the built-in defaults otherwise.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let descriptors =
            ResourceDescriptors::load(config.descriptors_path.as_deref().map(Path::new))?;
        let store = UserStore::new(database.get_connection());
        let user_service: Arc<dyn UserService> =
            Arc::new(UserManager::new(Arc::new(store), descriptors.user()));

        Ok(Self {
            user_service,
            database,
        })
    }

    /// Create new application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
