//! Mock provider implementing every capability.

use async_trait::async_trait;
use mindful::{
    AspectRatio, AudioClip, GeminiError, GeminiErrorKind, GenerateRequest, GenerateResponse,
    ImageGeneration, Input, JsonMode, MindfulDriver, MindfulResult, Output, SpeechSynthesis,
    TextGeneration, VideoGeneration, VideoJob, VideoJobStatus, VideoRequest, VoiceName,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers structured calls by the shape of the requested schema.
#[derive(Debug, Default)]
pub struct MockProvider {
    fail_media: bool,
    json_calls: AtomicUsize,
    image_calls: AtomicUsize,
    speech_calls: AtomicUsize,
    text_calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail image and video generation.
    pub fn failing_media() -> Self {
        Self {
            fail_media: true,
            ..Self::default()
        }
    }

    pub fn json_calls(&self) -> usize {
        self.json_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn speech_calls(&self) -> usize {
        self.speech_calls.load(Ordering::SeqCst)
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }
}

fn unavailable() -> mindful::MindfulError {
    GeminiError::new(GeminiErrorKind::HttpError {
        status_code: 503,
        message: "unavailable".to_string(),
    })
    .into()
}

impl MindfulDriver for MockProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl TextGeneration for MockProvider {
    async fn generate(&self, _req: &GenerateRequest) -> MindfulResult<GenerateResponse> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerateResponse {
            outputs: vec![Output::Text("Happy to help.".to_string())],
            grounding: vec![],
        })
    }
}

#[async_trait]
impl JsonMode for MockProvider {
    async fn generate_json(
        &self,
        _req: &GenerateRequest,
        schema: &serde_json::Value,
    ) -> MindfulResult<serde_json::Value> {
        self.json_calls.fetch_add(1, Ordering::SeqCst);
        let properties = &schema["properties"];
        let value = if properties.get("visualPrompt").is_some() {
            json!({"visualPrompt": "a lantern over still water", "caption": "Quiet light."})
        } else if properties.get("sentiment").is_some() {
            json!({"sentiment": "Calm", "reflection": "Rest is progress too.", "tags": ["rest", "evening"]})
        } else if properties.get("tasks").is_some() {
            json!({"tasks": [{"title": "Read chapter 1", "priority": "MEDIUM", "subject": "History"}]})
        } else {
            json!({"destinations": ["Lisbon"]})
        };
        Ok(value)
    }
}

#[async_trait]
impl ImageGeneration for MockProvider {
    async fn generate_image(
        &self,
        _parts: &[Input],
        _aspect_ratio: AspectRatio,
    ) -> MindfulResult<Vec<Output>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_media {
            return Err(unavailable());
        }
        Ok(vec![Output::Image {
            mime: "image/png".to_string(),
            data: vec![4, 5, 6],
        }])
    }
}

#[async_trait]
impl VideoGeneration for MockProvider {
    async fn submit_video(&self, _req: &VideoRequest) -> MindfulResult<VideoJob> {
        if self.fail_media {
            return Err(unavailable());
        }
        Ok(VideoJob {
            name: "operations/mock".to_string(),
        })
    }

    async fn poll_video(&self, _job: &VideoJob) -> MindfulResult<VideoJobStatus> {
        Ok(VideoJobStatus::finished("mock://clip.mp4"))
    }

    async fn fetch_video(&self, _uri: &str) -> MindfulResult<Vec<u8>> {
        Ok(vec![0, 0, 0, 24])
    }
}

#[async_trait]
impl SpeechSynthesis for MockProvider {
    async fn synthesize(&self, _prompt: &str, _voice: VoiceName) -> MindfulResult<AudioClip> {
        self.speech_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AudioClip {
            mime_type: "audio/L16;codec=pcm;rate=24000".to_string(),
            data: vec![1, 0, 1, 0],
        })
    }
}
