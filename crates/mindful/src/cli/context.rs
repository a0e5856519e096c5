//! Shared setup for command handlers.

use mindful::{
    FileSystemStore, GeminiClient, JournalRepository, Mindful, MindfulConfig, MindfulResult,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Resolved configuration plus constructors for what handlers need.
pub struct Context {
    config: MindfulConfig,
}

impl Context {
    /// Load configuration from `path`, or from the standard locations.
    pub fn load(path: Option<&Path>) -> MindfulResult<Self> {
        let config = match path {
            Some(path) => MindfulConfig::from_file(path)?,
            None => MindfulConfig::load()?,
        };
        Ok(Self { config })
    }

    /// Journal state under the configured data directory.
    pub fn repository(&self) -> MindfulResult<JournalRepository> {
        let dir = self.config.storage.data_dir();
        debug!(path = %dir.display(), "Opening journal");
        Ok(JournalRepository::new(FileSystemStore::new(dir)?))
    }

    /// Journal plus a Gemini client, for commands that generate content.
    pub fn app(&self) -> MindfulResult<Mindful<GeminiClient>> {
        let client = Arc::new(GeminiClient::from_config(&self.config)?);
        Ok(Mindful::new(self.repository()?, client, &self.config))
    }
}
