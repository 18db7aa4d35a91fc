use std::sync::Arc;

use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::store::{CredentialStore, StoreError, SupabaseStore};

/// Process-wide handles, built once at startup and shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn CredentialStore>) -> Self {
        let authenticator = Authenticator::new(store, config.auth.key_match);
        Self {
            config: Arc::new(config),
            authenticator: Arc::new(authenticator),
        }
    }

    /// State backed by the hosted key table named in the config
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let store = SupabaseStore::new(&config.store)?;
        Ok(Self::new(config, Arc::new(store)))
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        self.authenticator.store()
    }
}
