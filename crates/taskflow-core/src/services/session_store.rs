//! Session Store - the single owner of the in-memory credential.
//!
//! Durable storage is a mirror written on every transition and read only
//! by [`SessionStore::initialize`]. Transitions are serialized so the
//! mirror and the in-memory copy never diverge.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use crate::domain::{Credential, Session};
use crate::error::StorageError;
use crate::ports::{CredentialSource, CredentialStore};

pub struct SessionStore {
    storage: Arc<dyn CredentialStore>,
    state: watch::Sender<Session>,
    transition: Mutex<()>,
}

impl SessionStore {
    /// Create a store in the hydrating state (`loading = true`).
    pub fn new(storage: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(Session::hydrating());
        Self {
            storage,
            state,
            transition: Mutex::new(()),
        }
    }

    /// Hydrate from durable storage.
    ///
    /// Presence of a stored credential is trusted without asking the
    /// server. An unreadable store is treated as empty. `loading` is
    /// `false` once this returns.
    pub async fn initialize(&self) {
        let _guard = self.transition.lock().await;
        self.state.send_modify(|s| s.loading = true);

        let credential = match self.storage.load().await {
            Ok(Some(raw)) => match Credential::new(raw) {
                Ok(credential) => Some(credential),
                Err(_) => {
                    tracing::debug!("Ignoring blank persisted credential");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted credential, starting signed out");
                None
            }
        };

        tracing::debug!(
            authenticated = credential.is_some(),
            "Session hydrated"
        );

        self.state.send_modify(|s| {
            s.credential = credential;
            s.user = None;
            s.loading = false;
        });
    }

    /// Adopt `credential` and persist it.
    ///
    /// Storage is written first; on failure nothing changes.
    pub async fn login(&self, credential: Credential) -> Result<(), StorageError> {
        let _guard = self.transition.lock().await;
        self.storage.save(credential.as_str()).await?;
        self.state.send_modify(|s| {
            s.credential = Some(credential);
            s.loading = false;
        });
        tracing::info!("Session established");
        Ok(())
    }

    /// Drop the credential and user, and delete the persisted copy.
    pub async fn logout(&self) -> Result<(), StorageError> {
        let _guard = self.transition.lock().await;
        self.storage.clear().await?;
        self.state.send_modify(|s| {
            s.credential = None;
            s.user = None;
        });
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Current session snapshot.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}

impl CredentialSource for SessionStore {
    fn credential(&self) -> Option<Credential> {
        self.state.borrow().credential.clone()
    }
}
