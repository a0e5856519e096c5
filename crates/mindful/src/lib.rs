//! Mindful - AI journaling companion
//!
//! Mindful keeps a private diary and turns entries into a multimedia feed:
//! each post pairs a generated image or short video with a caption and an
//! optional narrated retelling of the entry. Around the feed sit companion
//! features for reflection, study planning, travel and chat.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mindful::{GeminiClient, JournalRepository, MemoryStore, Mindful, MindfulConfig, Mood};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> mindful::MindfulResult<()> {
//! let config = MindfulConfig::load()?;
//! let client = Arc::new(GeminiClient::from_config(&config)?);
//! let app = Mindful::new(JournalRepository::new(MemoryStore::new()), client, &config);
//!
//! let entry = app.write_entry("Walked by the river at sunset.", Mood::Great, vec![]).await?;
//! let post = app.generate_post(Some(&entry.id), &CancellationToken::new()).await?;
//! println!("{}", post.caption());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Mindful is organized as a workspace with focused crates:
//!
//! - `mindful_core` - Data model (entries, posts, tasks, trips, messages)
//! - `mindful_error` - Error types
//! - `mindful_interface` - Provider capability traits
//! - `mindful_config` - Layered TOML configuration
//! - `mindful_models` - Gemini REST client
//! - `mindful_storage` - Durable journal state
//! - `mindful_feed` - Entry to feed post pipeline
//! - `mindful_companion` - Reflection, study, travel and chat
//!
//! This crate (`mindful`) re-exports everything for convenience.

mod app;
pub mod audio;

pub use app::Mindful;

pub use mindful_companion::*;
pub use mindful_config::*;
pub use mindful_core::*;
pub use mindful_error::*;
pub use mindful_feed::*;
pub use mindful_interface::*;
pub use mindful_models::GeminiClient;
pub use mindful_storage::*;
