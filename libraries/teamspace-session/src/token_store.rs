//! Durable token storage
//!
//! The session token is the only piece of client state that outlives the
//! process. It is stored as a single string under [`TOKEN_KEY`].
//!
//! # Example
//!
//! ```rust,no_run
//! use teamspace_session::{FileTokenStore, TokenStore};
//! # async fn example() -> Result<(), teamspace_session::TokenStoreError> {
//! let store = FileTokenStore::open("/tmp/teamspace/session.json").await?;
//! store.store("t1").await?;
//! assert_eq!(store.load().await.as_deref(), Some("t1"));
//! # Ok(())
//! # }
//! ```

use crate::error::TokenStoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use teamspace_client::CredentialSource;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::debug;

pub type Result<T> = std::result::Result<T, TokenStoreError>;

/// Key the durable token is stored under
pub const TOKEN_KEY: &str = "token";

/// Persistent home of the session token
///
/// Every store is also a [`CredentialSource`], so the gateway can read the
/// token straight from it.
#[async_trait]
pub trait TokenStore: CredentialSource {
    /// Stored token, if any
    async fn load(&self) -> Option<String>;

    /// Replace the stored token
    async fn store(&self, token: &str) -> Result<()>;

    /// Remove the stored token. Removing a missing token succeeds.
    async fn clear(&self) -> Result<()>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Token store that forgets everything when the process exits
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token, as if left over from a previous run
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl CredentialSource for MemoryTokenStore {
    async fn bearer_token(&self) -> Option<String> {
        self.load().await
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn store(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Token store backed by a small JSON object file
///
/// The file is read once on open and written through on every change. Keys
/// other than [`TOKEN_KEY`] are preserved.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileTokenStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(
            path = %path.display(),
            has_token = entries.contains_key(TOKEN_KEY),
            "Opened token store"
        );

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let contents = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");

        // A stale temp file could carry looser permissions; start fresh
        match tokio::fs::remove_file(&tmp_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut file = private_file_options().open(&tmp_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}

/// Options for a new file only the owner can read
fn private_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);
    options
}

#[async_trait]
impl CredentialSource for FileTokenStore {
    async fn bearer_token(&self) -> Option<String> {
        self.load().await
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Option<String> {
        self.entries.read().await.get(TOKEN_KEY).cloned()
    }

    async fn store(&self, token: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        let mut updated = entries.clone();
        updated.insert(TOKEN_KEY.to_string(), token.to_string());

        self.persist(&updated).await?;
        *entries = updated;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(TOKEN_KEY) {
            return Ok(());
        }

        let mut updated = entries.clone();
        updated.remove(TOKEN_KEY);

        self.persist(&updated).await?;
        *entries = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().await, None);

        store.store("t1").await.unwrap();
        assert_eq!(store.bearer_token().await.as_deref(), Some("t1"));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    async fn test_file_store_round_trip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileTokenStore::open(&path).await.unwrap();
        assert_eq!(store.load().await, None);
        store.store("t1").await.unwrap();

        let reopened = FileTokenStore::open(&path).await.unwrap();
        assert_eq!(reopened.load().await.as_deref(), Some("t1"));

        reopened.clear().await.unwrap();
        let cleared = FileTokenStore::open(&path).await.unwrap();
        assert_eq!(cleared.load().await, None);
    }

    #[tokio::test]
    async fn test_file_store_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, r#"{"theme":"dark","token":"old"}"#)
            .await
            .unwrap();

        let store = FileTokenStore::open(&path).await.unwrap();
        assert_eq!(store.load().await.as_deref(), Some("old"));
        store.clear().await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&contents).unwrap();
        assert_eq!(entries.get("theme").map(String::as_str), Some("dark"));
        assert!(!entries.contains_key(TOKEN_KEY));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_is_owner_only_even_over_stale_temp_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let tmp_path = path.with_extension("tmp");
        tokio::fs::write(&tmp_path, "left over").await.unwrap();
        tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o644))
            .await
            .unwrap();

        let store = FileTokenStore::open(&path).await.unwrap();
        store.store("t1").await.unwrap();

        let mode = tokio::fs::metadata(&path).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!tmp_path.exists());
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let result = FileTokenStore::open(&path).await;
        assert!(matches!(result, Err(TokenStoreError::Serialization(_))));
    }
}
