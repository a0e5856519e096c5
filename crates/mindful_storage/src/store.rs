//! Storage trait definition.

use mindful_error::{MindfulResult, StorageError, StorageErrorKind};

/// Trait for pluggable document stores.
///
/// Each key maps to a single JSON document. Implementations must make
/// `save` atomic per key: a reader sees either the old or the new document,
/// never a partial one.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the document stored under `key`, or `None` if absent.
    async fn load(&self, key: &str) -> MindfulResult<Option<serde_json::Value>>;

    /// Replace the document stored under `key`.
    async fn save(&self, key: &str, value: &serde_json::Value) -> MindfulResult<()>;
}

/// Reject keys that cannot be used as a single path component.
pub(crate) fn validate_key(key: &str) -> MindfulResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::new(StorageErrorKind::InvalidKey(key.to_string())).into())
    }
}
