//! Application state - the session, transport and managers for one run.

use std::sync::Arc;

use anyhow::{Context, Result};

use taskflow_core::ports::{ApiClient, CredentialStore};
use taskflow_core::{AuthService, SessionStore, TaskCollectionManager};
use taskflow_infra::{FileCredentialStore, HttpApiClient, InMemoryCredentialStore};

use crate::config::AppConfig;
use crate::router::Router;

pub struct AppState {
    pub session: Arc<SessionStore>,
    pub auth: AuthService,
    pub tasks: Arc<TaskCollectionManager>,
}

impl AppState {
    /// Wire the adapters together and hydrate the session.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let storage: Arc<dyn CredentialStore> = match &config.home {
            Some(dir) => Arc::new(FileCredentialStore::new(dir)),
            None => {
                tracing::warn!(
                    "No home directory found. Set TASKFLOW_HOME to keep the session between runs."
                );
                Arc::new(InMemoryCredentialStore::new())
            }
        };

        let session = Arc::new(SessionStore::new(storage));
        let api: Arc<dyn ApiClient> = Arc::new(
            HttpApiClient::new(config.http.clone(), session.clone())
                .context("Failed to build HTTP client")?,
        );

        session.initialize().await;
        tracing::debug!(
            api = %config.http.base_url,
            authenticated = session.is_authenticated(),
            "Application state initialized"
        );

        Ok(Self {
            auth: AuthService::new(api.clone(), session.clone()),
            tasks: Arc::new(TaskCollectionManager::new(api)),
            session,
        })
    }

    pub fn router(&self) -> Router {
        Router::new(self.session.subscribe())
    }
}
