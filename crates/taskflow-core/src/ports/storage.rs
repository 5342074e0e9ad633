//! Credential persistence ports.

use async_trait::async_trait;

use crate::domain::Credential;
use crate::error::StorageError;

/// Fixed key under which the raw credential is persisted.
pub const CREDENTIAL_KEY: &str = "token";

/// Durable storage holding at most one raw credential string.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the persisted credential. `None` means nothing is stored.
    async fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the persisted credential.
    async fn save(&self, credential: &str) -> Result<(), StorageError>;

    /// Remove the persisted credential. Removing nothing is not an error.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Read access to the in-memory credential, handed to the transport.
pub trait CredentialSource: Send + Sync {
    fn credential(&self) -> Option<Credential>;
}
