//! Mock provider recording every request it receives.

use async_trait::async_trait;
use mindful_core::{GenerateRequest, GenerateResponse, GroundingSource, Input, Output};
use mindful_error::{GeminiError, GeminiErrorKind, MindfulResult};
use mindful_interface::{AspectRatio, ImageGeneration, JsonMode, MindfulDriver, TextGeneration};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scriptable text, structured and image provider.
///
/// Text replies are consumed in order; once exhausted every call fails.
#[derive(Default)]
pub struct MockCompanionDriver {
    json: Mutex<Option<Result<serde_json::Value, GeminiErrorKind>>>,
    replies: Mutex<VecDeque<Result<GenerateResponse, GeminiErrorKind>>>,
    image: Mutex<Option<Result<Vec<Output>, GeminiErrorKind>>>,
    json_calls: AtomicUsize,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
    image_requests: Mutex<Vec<(Vec<Input>, AspectRatio)>>,
}

#[allow(dead_code)]
impl MockCompanionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer structured calls with `value`.
    pub fn with_json(self, value: serde_json::Value) -> Self {
        *self.json.lock().unwrap() = Some(Ok(value));
        self
    }

    /// Fail structured calls.
    pub fn with_json_error(self, error: GeminiErrorKind) -> Self {
        *self.json.lock().unwrap() = Some(Err(error));
        self
    }

    /// Queue a plain text reply.
    pub fn with_reply(self, text: &str) -> Self {
        self.with_response(GenerateResponse {
            outputs: vec![Output::Text(text.to_string())],
            grounding: vec![],
        })
    }

    /// Queue a reply with grounding sources.
    pub fn with_grounded_reply(self, text: &str, sources: Vec<(Option<&str>, Option<&str>)>) -> Self {
        self.with_response(GenerateResponse {
            outputs: vec![Output::Text(text.to_string())],
            grounding: sources
                .into_iter()
                .map(|(title, uri)| GroundingSource {
                    title: title.map(str::to_string),
                    uri: uri.map(str::to_string),
                })
                .collect(),
        })
    }

    pub fn with_response(self, response: GenerateResponse) -> Self {
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a failing text call.
    pub fn with_reply_error(self, error: GeminiErrorKind) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_image_outputs(self, outputs: Vec<Output>) -> Self {
        *self.image.lock().unwrap() = Some(Ok(outputs));
        self
    }

    pub fn with_image_error(self, error: GeminiErrorKind) -> Self {
        *self.image.lock().unwrap() = Some(Err(error));
        self
    }

    pub fn json_calls(&self) -> usize {
        self.json_calls.load(Ordering::SeqCst)
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    /// Every text and structured request, in call order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn image_requests(&self) -> Vec<(Vec<Input>, AspectRatio)> {
        self.image_requests.lock().unwrap().clone()
    }
}

fn gemini(kind: GeminiErrorKind) -> mindful_error::MindfulError {
    GeminiError::new(kind).into()
}

impl MindfulDriver for MockCompanionDriver {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl TextGeneration for MockCompanionDriver {
    async fn generate(&self, req: &GenerateRequest) -> MindfulResult<GenerateResponse> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply.map_err(gemini),
            None => Err(gemini(GeminiErrorKind::EmptyResponse)),
        }
    }
}

#[async_trait]
impl JsonMode for MockCompanionDriver {
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        _schema: &serde_json::Value,
    ) -> MindfulResult<serde_json::Value> {
        self.json_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req.clone());
        match self.json.lock().unwrap().clone() {
            Some(result) => result.map_err(gemini),
            None => Err(gemini(GeminiErrorKind::EmptyResponse)),
        }
    }
}

#[async_trait]
impl ImageGeneration for MockCompanionDriver {
    async fn generate_image(
        &self,
        parts: &[Input],
        aspect_ratio: AspectRatio,
    ) -> MindfulResult<Vec<Output>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.image_requests
            .lock()
            .unwrap()
            .push((parts.to_vec(), aspect_ratio));
        match self.image.lock().unwrap().clone() {
            Some(result) => result.map_err(gemini),
            None => Ok(vec![]),
        }
    }
}
