//! Configuration for the Mindful workspace.
//!
//! Settings are layered with the `config` crate, later sources overriding
//! earlier ones:
//! 1. Bundled defaults (`mindful.toml` shipped with the library)
//! 2. `~/.config/mindful/mindful.toml`
//! 3. `./mindful.toml`
//! 4. `MINDFUL__SECTION__KEY` environment variables
//!
//! # Example
//!
//! ```no_run
//! use mindful_config::MindfulConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MindfulConfig::load()?;
//! println!("Text model: {}", config.models.text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use mindful_core::VoiceName;
use mindful_error::{ConfigError, MindfulError, MindfulResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../mindful.toml");

/// Model identifiers used for each capability.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelCatalog {
    /// Text and structured-output model
    pub text: String,
    /// Image generation model
    pub image: String,
    /// Text-to-speech model
    pub speech: String,
    /// Reference-conditioned video model
    pub video: String,
    /// Text-only video model
    pub fast_video: String,
}

/// Gemini REST client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeminiSettings {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Disable automatic retry of transient errors
    #[serde(default)]
    pub no_retry: bool,
    /// Override maximum retry attempts
    #[serde(default)]
    pub max_retries: Option<usize>,
    /// Override initial backoff delay
    #[serde(default)]
    pub retry_backoff_ms: Option<u64>,
}

impl GeminiSettings {
    /// Per-request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Feed pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineSettings {
    /// Seconds between video job polls
    pub poll_interval_secs: u64,
    /// Wall-clock ceiling for a video job
    pub video_deadline_secs: u64,
    /// Narration voice
    pub voice: VoiceName,
    /// Video frame resolution
    pub video_resolution: String,
}

impl PipelineSettings {
    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Video deadline as a duration.
    pub fn video_deadline(&self) -> Duration {
        Duration::from_secs(self.video_deadline_secs)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            video_deadline_secs: 600,
            voice: VoiceName::Kore,
            video_resolution: "720p".to_string(),
        }
    }
}

/// Durable store settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Data directory; the platform data directory when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageSettings {
    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mindful")
        })
    }
}

/// Top-level Mindful configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MindfulConfig {
    /// Model identifiers
    pub models: ModelCatalog,
    /// Gemini client settings
    pub gemini: GeminiSettings,
    /// Pipeline settings
    #[serde(default)]
    pub pipeline: PipelineSettings,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageSettings,
}

impl MindfulConfig {
    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> MindfulResult<Self> {
        builder
            .build()
            .map_err(|e| {
                MindfulError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                MindfulError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Bundled defaults only.
    pub fn bundled() -> MindfulResult<Self> {
        Self::finish(Self::defaults())
    }

    /// Bundled defaults overridden by a TOML string.
    pub fn from_toml_str(overrides: &str) -> MindfulResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(overrides, FileFormat::Toml)))
    }

    /// Bundled defaults overridden by a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> MindfulResult<Self> {
        debug!("Loading configuration from file");
        Self::finish(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> MindfulResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/mindful/mindful.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("mindful").required(false))
            .add_source(Environment::with_prefix("MINDFUL").separator("__"));

        Self::finish(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults() {
        let config = MindfulConfig::bundled().unwrap();
        assert_eq!(config.models.text, "gemini-2.5-flash");
        assert_eq!(config.models.fast_video, "veo-3.1-fast-generate-preview");
        assert_eq!(config.pipeline, PipelineSettings::default());
        assert_eq!(config.gemini.api_key_env, "GEMINI_API_KEY");
        assert!(!config.gemini.no_retry);
        assert_eq!(config.storage.path, None);
    }

    #[test]
    fn test_overrides_merge_with_defaults() {
        let config = MindfulConfig::from_toml_str(
            r#"
            [pipeline]
            video_deadline_secs = 30
            voice = "Puck"

            [models]
            image = "custom-image-model"
            "#,
        )
        .unwrap();

        assert_eq!(config.pipeline.video_deadline(), Duration::from_secs(30));
        assert_eq!(config.pipeline.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.pipeline.voice, VoiceName::Puck);
        assert_eq!(config.models.image, "custom-image-model");
        assert_eq!(config.models.text, "gemini-2.5-flash");
    }

    #[test]
    fn test_explicit_storage_path() {
        let settings = StorageSettings {
            path: Some(PathBuf::from("/tmp/mindful-test")),
        };
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/mindful-test"));
    }
}
