//! In-memory implementation of KeyValueStore for testing.

use crate::KeyValueStore;
use crate::store::validate_key;
use async_trait::async_trait;
use mindful_error::MindfulResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory document store.
///
/// Stores documents in a HashMap protected by an RwLock for thread-safe access.
/// All data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: &str) -> MindfulResult<Option<serde_json::Value>> {
        validate_key(key)?;
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &serde_json::Value) -> MindfulResult<()> {
        validate_key(key)?;
        self.documents
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
