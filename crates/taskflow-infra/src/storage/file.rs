//! File-backed credential store.
//!
//! The credential is stored raw in `<dir>/token` with restricted
//! permissions (0600 on unix). It is never logged.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use taskflow_core::StorageError;
use taskflow_core::ports::{CREDENTIAL_KEY, CredentialStore};

pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store the credential under `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CREDENTIAL_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> StorageError {
        StorageError::Io(format!(
            "Failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path).await {
            // Tolerate the trailing newline a hand edit leaves behind.
            Ok(raw) => Ok(Some(raw.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error("read", e)),
        }
    }

    async fn save(&self, credential: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", e))?;
        }

        // Write beside the target and rename so a crash never leaves a
        // truncated credential behind.
        let tmp = self.path.with_extension("tmp");
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&tmp)
            .await
            .map_err(|e| self.io_error("open", e))?;
        file.write_all(credential.as_bytes())
            .await
            .map_err(|e| self.io_error("write", e))?;
        file.sync_all()
            .await
            .map_err(|e| self.io_error("flush", e))?;
        drop(file);

        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error("replace", e))?;

        tracing::debug!(path = %self.path.display(), "Credential persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Credential removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error("remove", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested"));

        store.save("eyJhbGciOi.payload.sig").await.unwrap();
        assert_eq!(
            store.load().await.unwrap().as_deref(),
            Some("eyJhbGciOi.payload.sig")
        );
        assert_eq!(store.path().file_name().unwrap(), CREDENTIAL_KEY);

        // A second instance over the same directory sees the same value.
        let reopened = FileCredentialStore::new(dir.path().join("nested"));
        assert_eq!(
            reopened.load().await.unwrap().as_deref(),
            Some("eyJhbGciOi.payload.sig")
        );

        store.clear().await.unwrap();
        assert_eq!(reopened.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        store.save("a-much-longer-first-token").await.unwrap();
        store.save("short").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn test_trailing_newline_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        std::fs::write(store.path(), "hand.edited.token\r\n").unwrap();
        assert_eq!(
            store.load().await.unwrap().as_deref(),
            Some("hand.edited.token")
        );

        // A file holding only a newline loads as blank, which signs nobody in.
        std::fs::write(store.path(), "\n").unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some(""));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path());
        store.save("secret").await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
