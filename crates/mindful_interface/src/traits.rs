//! Trait definitions for generative model providers and their capabilities.

use crate::{AspectRatio, VideoJob, VideoJobStatus, VideoRequest};
use async_trait::async_trait;
use mindful_core::{AudioClip, GenerateRequest, GenerateResponse, Input, Output, VoiceName};
use mindful_error::MindfulResult;

/// Core trait that all providers implement.
pub trait MindfulDriver: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier for text requests.
    fn model_name(&self) -> &str;
}

/// Plain text generation, including multi-turn chat.
#[async_trait]
pub trait TextGeneration: MindfulDriver {
    /// Generate model output given a multimodal request.
    async fn generate(&self, req: &GenerateRequest) -> MindfulResult<GenerateResponse>;
}

/// Structured output constrained by a response schema.
#[async_trait]
pub trait JsonMode: MindfulDriver {
    /// Generate output conforming to a JSON schema.
    ///
    /// Fails rather than returning output that does not parse.
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &serde_json::Value,
    ) -> MindfulResult<serde_json::Value>;
}

/// Image generation from text and reference image parts.
#[async_trait]
pub trait ImageGeneration: MindfulDriver {
    /// Generate an image. The response may mix text and image parts.
    async fn generate_image(
        &self,
        parts: &[Input],
        aspect_ratio: AspectRatio,
    ) -> MindfulResult<Vec<Output>>;
}

/// Asynchronous video generation.
#[async_trait]
pub trait VideoGeneration: MindfulDriver {
    /// Submit a job and return its handle.
    async fn submit_video(&self, req: &VideoRequest) -> MindfulResult<VideoJob>;

    /// Check the state of a job.
    async fn poll_video(&self, job: &VideoJob) -> MindfulResult<VideoJobStatus>;

    /// Download a finished clip.
    async fn fetch_video(&self, uri: &str) -> MindfulResult<Vec<u8>>;
}

/// Text-to-speech.
#[async_trait]
pub trait SpeechSynthesis: MindfulDriver {
    /// Speak `prompt` with the given voice.
    async fn synthesize(&self, prompt: &str, voice: VoiceName) -> MindfulResult<AudioClip>;
}
