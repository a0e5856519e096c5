//! Trait definitions for the Mindful generative backends.
//!
//! Each capability the journaling features rely on is its own trait so that
//! pipeline stages depend only on what they call, and tests can substitute
//! small fakes for a real provider.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    ImageGeneration, JsonMode, MindfulDriver, SpeechSynthesis, TextGeneration, VideoGeneration,
};
pub use types::{
    AspectRatio, VideoJob, VideoJobStatus, VideoMode, VideoRequest, VideoRequestBuilder,
};
