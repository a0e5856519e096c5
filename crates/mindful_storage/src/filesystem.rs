//! Filesystem-based document store.
//!
//! Each key is stored as `{base_path}/{key}.json`. Writes go to a temp file
//! that is renamed over the target, so a crash mid-write leaves the previous
//! document intact.

use crate::KeyValueStore;
use crate::store::validate_key;
use mindful_error::{MindfulResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem store.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> MindfulResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %base_path.display(), "Opened filesystem store");
        Ok(Self { base_path })
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileSystemStore {
    #[tracing::instrument(skip(self))]
    async fn load(&self, key: &str) -> MindfulResult<Option<serde_json::Value>> {
        validate_key(key)?;
        let path = self.document_path(key);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No document stored");
                return Ok(None);
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(Some(value))
    }

    #[tracing::instrument(skip(self, value))]
    async fn save(&self, key: &str, value: &serde_json::Value) -> MindfulResult<()> {
        validate_key(key)?;
        let path = self.document_path(key);

        let bytes = serde_json::to_vec_pretty(value).map_err(|e| {
            StorageError::new(StorageErrorKind::Encode {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Saved document");
        Ok(())
    }
}
