//! Mock provider implementing every feed capability.

use async_trait::async_trait;
use mindful_core::{AudioClip, GenerateRequest, Input, Output, VoiceName};
use mindful_error::{GeminiError, GeminiErrorKind, JsonError, MindfulError, MindfulResult};
use mindful_interface::{
    AspectRatio, ImageGeneration, JsonMode, MindfulDriver, SpeechSynthesis, VideoGeneration,
    VideoJob, VideoJobStatus, VideoRequest,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// How the mock video job behaves.
#[derive(Debug, Clone)]
pub enum VideoScript {
    /// Pending for `pending_polls` polls, then done with a clip
    FinishAfter { pending_polls: usize },
    /// Never finishes
    NeverFinishes,
    /// Finishes immediately with a service error
    FailsWith(String),
    /// Finishes immediately without a download location
    NoLocation,
}

/// Scriptable mock of a generative provider.
///
/// Every capability succeeds by default. Call counters record how often
/// each capability was invoked.
pub struct MockFeedDriver {
    brief: Result<serde_json::Value, GeminiErrorKind>,
    brief_unparseable: bool,
    image: Result<Vec<Output>, GeminiErrorKind>,
    speech: Result<AudioClip, GeminiErrorKind>,
    speech_delay: Option<Duration>,
    video: VideoScript,
    json_calls: AtomicUsize,
    image_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    poll_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    speech_calls: AtomicUsize,
    last_image_parts: Mutex<Vec<Input>>,
    last_aspect_ratio: Mutex<Option<AspectRatio>>,
    last_video_request: Mutex<Option<VideoRequest>>,
}

impl Default for MockFeedDriver {
    fn default() -> Self {
        Self {
            brief: Ok(json!({
                "visualPrompt": "a river glowing at sunset",
                "caption": "Lighter with every step."
            })),
            brief_unparseable: false,
            image: Ok(vec![
                Output::Text("Here is your image".to_string()),
                Output::Image {
                    mime: "image/png".to_string(),
                    data: vec![1, 2, 3],
                },
                Output::Image {
                    mime: "image/png".to_string(),
                    data: vec![9, 9, 9],
                },
            ]),
            speech: Ok(AudioClip {
                mime_type: "audio/L16;codec=pcm;rate=24000".to_string(),
                data: vec![0, 1, 0, 1],
            }),
            speech_delay: None,
            video: VideoScript::FinishAfter { pending_polls: 2 },
            json_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            speech_calls: AtomicUsize::new(0),
            last_image_parts: Mutex::new(Vec::new()),
            last_aspect_ratio: Mutex::new(None),
            last_video_request: Mutex::new(None),
        }
    }
}

#[allow(dead_code)]
impl MockFeedDriver {
    /// A mock where every capability succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this JSON from the structured-output call.
    pub fn with_brief(mut self, value: serde_json::Value) -> Self {
        self.brief = Ok(value);
        self
    }

    /// Fail the structured-output call.
    pub fn with_brief_error(mut self, error: GeminiErrorKind) -> Self {
        self.brief = Err(error);
        self
    }

    /// Answer the structured-output call with text that is not JSON.
    pub fn with_unparseable_brief(mut self) -> Self {
        self.brief_unparseable = true;
        self
    }

    /// Return these parts from image generation.
    pub fn with_image_outputs(mut self, outputs: Vec<Output>) -> Self {
        self.image = Ok(outputs);
        self
    }

    /// Fail image generation.
    pub fn with_image_error(mut self, error: GeminiErrorKind) -> Self {
        self.image = Err(error);
        self
    }

    /// Fail speech synthesis.
    pub fn with_speech_error(mut self, error: GeminiErrorKind) -> Self {
        self.speech = Err(error);
        self
    }

    /// Make speech synthesis take `delay` before answering.
    pub fn with_slow_speech(mut self, delay: Duration) -> Self {
        self.speech_delay = Some(delay);
        self
    }

    /// Script the video job.
    pub fn with_video(mut self, script: VideoScript) -> Self {
        self.video = script;
        self
    }

    pub fn json_calls(&self) -> usize {
        self.json_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn speech_calls(&self) -> usize {
        self.speech_calls.load(Ordering::SeqCst)
    }

    /// Calls to any capability other than structured output.
    pub fn downstream_calls(&self) -> usize {
        self.image_calls() + self.submit_calls() + self.speech_calls()
    }

    pub fn last_image_parts(&self) -> Vec<Input> {
        self.last_image_parts.lock().unwrap().clone()
    }

    pub fn last_aspect_ratio(&self) -> Option<AspectRatio> {
        *self.last_aspect_ratio.lock().unwrap()
    }

    pub fn last_video_request(&self) -> Option<VideoRequest> {
        self.last_video_request.lock().unwrap().clone()
    }
}

fn gemini(kind: &GeminiErrorKind) -> MindfulError {
    GeminiError::new(kind.clone()).into()
}

impl MindfulDriver for MockFeedDriver {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl JsonMode for MockFeedDriver {
    async fn generate_json(
        &self,
        _req: &GenerateRequest,
        _schema: &serde_json::Value,
    ) -> MindfulResult<serde_json::Value> {
        self.json_calls.fetch_add(1, Ordering::SeqCst);
        if self.brief_unparseable {
            return Err(JsonError::new("expected value at line 1 column 1").into());
        }
        self.brief.clone().map_err(|kind| gemini(&kind))
    }
}

#[async_trait]
impl ImageGeneration for MockFeedDriver {
    async fn generate_image(
        &self,
        parts: &[Input],
        aspect_ratio: AspectRatio,
    ) -> MindfulResult<Vec<Output>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image_parts.lock().unwrap() = parts.to_vec();
        *self.last_aspect_ratio.lock().unwrap() = Some(aspect_ratio);
        self.image.clone().map_err(|kind| gemini(&kind))
    }
}

#[async_trait]
impl VideoGeneration for MockFeedDriver {
    async fn submit_video(&self, req: &VideoRequest) -> MindfulResult<VideoJob> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_video_request.lock().unwrap() = Some(req.clone());
        Ok(VideoJob {
            name: "operations/mock".to_string(),
        })
    }

    async fn poll_video(&self, _job: &VideoJob) -> MindfulResult<VideoJobStatus> {
        let polls_before = self.poll_calls.fetch_add(1, Ordering::SeqCst);
        let status = match &self.video {
            VideoScript::FinishAfter { pending_polls } if polls_before < *pending_polls => {
                VideoJobStatus::pending()
            }
            VideoScript::FinishAfter { .. } => VideoJobStatus::finished("mock://clip.mp4"),
            VideoScript::NeverFinishes => VideoJobStatus::pending(),
            VideoScript::FailsWith(message) => VideoJobStatus {
                done: true,
                result_uri: None,
                error: Some(message.clone()),
            },
            VideoScript::NoLocation => VideoJobStatus {
                done: true,
                result_uri: None,
                error: None,
            },
        };
        Ok(status)
    }

    async fn fetch_video(&self, _uri: &str) -> MindfulResult<Vec<u8>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0, 0, 0, 24, 102, 116, 121, 112])
    }
}

#[async_trait]
impl SpeechSynthesis for MockFeedDriver {
    async fn synthesize(&self, _prompt: &str, _voice: VoiceName) -> MindfulResult<AudioClip> {
        self.speech_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.speech_delay {
            tokio::time::sleep(delay).await;
        }
        self.speech.clone().map_err(|kind| gemini(&kind))
    }
}
