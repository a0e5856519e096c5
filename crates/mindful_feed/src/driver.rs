//! Capability bundle the pipeline runs against.

use mindful_interface::{ImageGeneration, JsonMode, SpeechSynthesis, VideoGeneration};

/// Every capability a feed run may need.
///
/// Implemented automatically for any provider that has all four.
pub trait FeedDriver: JsonMode + ImageGeneration + VideoGeneration + SpeechSynthesis {}

impl<T> FeedDriver for T where T: JsonMode + ImageGeneration + VideoGeneration + SpeechSynthesis {}
