//! In-memory credential store - used when no durable location exists.

use async_trait::async_trait;
use tokio::sync::RwLock;

use taskflow_core::StorageError;
use taskflow_core::ports::CredentialStore;

/// Holds the credential for the life of the process only.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    value: RwLock<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.read().await.clone())
    }

    async fn save(&self, credential: &str) -> Result<(), StorageError> {
        *self.value.write().await = Some(credential.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.value.write().await = None;
        Ok(())
    }
}
