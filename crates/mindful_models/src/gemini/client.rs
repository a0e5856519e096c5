//! Gemini REST client.

use super::GeminiResult;
use super::conversion::{error_message, from_gemini_response, inputs_to_parts, to_gemini_request};
use super::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfigDto, ImageBytes,
    ImageConfig, Operation, PredictLongRunningRequest, ReferenceImage, SpeechConfig,
    VideoInstance, VideoParameters,
};
use async_trait::async_trait;
use mindful_config::{GeminiSettings, MindfulConfig, ModelCatalog};
use mindful_core::{AudioClip, GenerateRequest, GenerateResponse, Input, Output, VoiceName, encoding};
use mindful_error::{
    GeminiError, GeminiErrorKind, JsonError, MindfulResult, RetryableError,
};
use mindful_interface::{
    AspectRatio, ImageGeneration, JsonMode, MindfulDriver, SpeechSynthesis, TextGeneration,
    VideoGeneration, VideoJob, VideoJobStatus, VideoMode, VideoRequest,
};
use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini REST API client.
///
/// One client serves every model in the [`ModelCatalog`]; the model is
/// picked per call from the capability being used.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    models: ModelCatalog,
    /// Retry configuration
    no_retry: bool,
    max_retries: Option<usize>,
    retry_backoff_ms: Option<u64>,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(base_url = %settings.base_url))]
    pub fn new(
        api_key: impl Into<String>,
        settings: &GeminiSettings,
        models: ModelCatalog,
    ) -> GeminiResult<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            models,
            no_retry: settings.no_retry,
            max_retries: settings.max_retries,
            retry_backoff_ms: settings.retry_backoff_ms,
        })
    }

    /// Create a client from configuration, reading the API key from the
    /// environment variable named by `gemini.api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is not set in the environment
    /// - The HTTP client cannot be initialized
    pub fn from_config(config: &MindfulConfig) -> GeminiResult<Self> {
        let key_var = &config.gemini.api_key_env;
        let api_key = std::env::var(key_var)
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey(key_var.clone())))?;
        Self::new(api_key, &config.gemini, config.models.clone())
    }

    /// Models this client routes requests to.
    pub fn models(&self) -> &ModelCatalog {
        &self.models
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn check_status(response: Response) -> GeminiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GeminiError::new(GeminiErrorKind::HttpError {
            status_code: status.as_u16(),
            message: error_message(&body),
        }))
    }

    async fn post_once<B, R>(&self, url: &str, body: &B) -> GeminiResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        Self::check_status(response)
            .await?
            .json::<R>()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::InvalidResponse(e.to_string())))
    }

    async fn get_once(&self, url: &str) -> GeminiResult<Response> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;
        Self::check_status(response).await
    }

    /// Run `attempt`, retrying transient failures with exponential backoff.
    ///
    /// The backoff schedule comes from the first error, with configured
    /// overrides applied.
    async fn with_retry<T, F, Fut>(&self, operation: &str, attempt: F) -> GeminiResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = GeminiResult<T>>,
    {
        use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};

        let first_error = match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if self.no_retry || !first_error.is_retryable() {
            warn!(error = %first_error, operation, "Gemini request failed, not retrying");
            return Err(first_error);
        }

        let (mut initial_ms, mut max_retries, max_delay_secs) =
            first_error.retry_strategy_params();
        if let Some(override_backoff) = self.retry_backoff_ms {
            initial_ms = override_backoff;
        }
        if let Some(override_retries) = self.max_retries {
            max_retries = override_retries;
        }

        info!(
            error = %first_error,
            operation,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Gemini request failed, will retry with configured strategy"
        );

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        Retry::spawn(retry_strategy, || {
            let fut = attempt();
            async move {
                match fut.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(error = %e, "Gemini request failed, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(error = %e, "Permanent Gemini error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> GeminiResult<GenerateResponse> {
        let url = self.model_url(model, "generateContent");
        debug!(url = %url, "Sending Gemini generateContent request");
        let response: GenerateContentResponse = self
            .with_retry("generateContent", || self.post_once(&url, body))
            .await?;
        from_gemini_response(&response)
    }

    fn video_model(&self, mode: VideoMode) -> &str {
        match mode {
            VideoMode::ReferenceConditioned => &self.models.video,
            VideoMode::TextOnly => &self.models.fast_video,
        }
    }
}

impl MindfulDriver for GeminiClient {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.models.text
    }
}

#[async_trait]
impl TextGeneration for GeminiClient {
    #[instrument(skip(self, req), fields(messages = req.messages().len()))]
    async fn generate(&self, req: &GenerateRequest) -> MindfulResult<GenerateResponse> {
        let model = req.model().as_deref().unwrap_or(self.models.text.as_str());
        let body = to_gemini_request(req)?;
        Ok(self.generate_content(model, &body).await?)
    }
}

#[async_trait]
impl JsonMode for GeminiClient {
    #[instrument(skip(self, req, schema))]
    async fn generate_json(
        &self,
        req: &GenerateRequest,
        schema: &serde_json::Value,
    ) -> MindfulResult<serde_json::Value> {
        let model = req.model().as_deref().unwrap_or(self.models.text.as_str());
        let mut body = to_gemini_request(req)?;
        body.generation_config.response_mime_type = Some("application/json".to_string());
        body.generation_config.response_schema = Some(schema.clone());

        let response = self.generate_content(model, &body).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse).into());
        }
        serde_json::from_str(&text).map_err(|e| {
            JsonError::new(format!("Structured response did not parse: {}", e)).into()
        })
    }
}

#[async_trait]
impl ImageGeneration for GeminiClient {
    #[instrument(skip(self, parts), fields(parts = parts.len(), aspect_ratio = %aspect_ratio))]
    async fn generate_image(
        &self,
        parts: &[Input],
        aspect_ratio: AspectRatio,
    ) -> MindfulResult<Vec<Output>> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: inputs_to_parts(parts)?,
            }],
            generation_config: GenerationConfigDto {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.to_string(),
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        let response = self.generate_content(&self.models.image, &body).await?;
        Ok(response.outputs)
    }
}

#[async_trait]
impl VideoGeneration for GeminiClient {
    #[instrument(skip(self, req), fields(mode = %req.mode(), references = req.reference_images().len()))]
    async fn submit_video(&self, req: &VideoRequest) -> MindfulResult<VideoJob> {
        let reference_images = req
            .reference_images()
            .iter()
            .map(|image| ReferenceImage {
                image: ImageBytes {
                    bytes_base64_encoded: encoding::encode(&image.data),
                    mime_type: image.mime_type.clone(),
                },
                reference_type: "asset".to_string(),
            })
            .collect();

        let body = PredictLongRunningRequest {
            instances: vec![VideoInstance {
                prompt: req.prompt().clone(),
                reference_images,
            }],
            parameters: VideoParameters {
                aspect_ratio: req.aspect_ratio().to_string(),
                resolution: req.resolution().clone(),
            },
        };

        let url = self.model_url(self.video_model(*req.mode()), "predictLongRunning");
        let operation: Operation = self
            .with_retry("predictLongRunning", || self.post_once(&url, &body))
            .await?;

        info!(operation = %operation.name, "Video job submitted");
        Ok(VideoJob {
            name: operation.name,
        })
    }

    #[instrument(skip(self), fields(operation = %job.name))]
    async fn poll_video(&self, job: &VideoJob) -> MindfulResult<VideoJobStatus> {
        let url = format!("{}/{}", self.base_url, job.name);
        let response = self
            .with_retry("getOperation", || self.get_once(&url))
            .await?;
        let operation: Operation = response
            .json()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::InvalidResponse(e.to_string())))?;

        if !operation.done {
            debug!("Video job still running");
            return Ok(VideoJobStatus::pending());
        }

        let error = operation.error.as_ref().map(|e| {
            e.message
                .clone()
                .unwrap_or_else(|| format!("code {}", e.code.unwrap_or_default()))
        });

        Ok(VideoJobStatus {
            done: true,
            result_uri: operation.video_uri().map(str::to_string),
            error,
        })
    }

    #[instrument(skip(self, uri))]
    async fn fetch_video(&self, uri: &str) -> MindfulResult<Vec<u8>> {
        let response = self.with_retry("fetchVideo", || self.get_once(uri)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;
        debug!(bytes = bytes.len(), "Video downloaded");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesis for GeminiClient {
    #[instrument(skip(self, prompt), fields(voice = %voice))]
    async fn synthesize(&self, prompt: &str, voice: VoiceName) -> MindfulResult<AudioClip> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: inputs_to_parts(&[Input::Text(prompt.to_string())])?,
            }],
            generation_config: GenerationConfigDto {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig::prebuilt(voice.as_ref())),
                ..Default::default()
            },
            ..Default::default()
        };

        let response = self.generate_content(&self.models.speech, &body).await?;
        response
            .outputs
            .into_iter()
            .find_map(|output| match output {
                Output::Audio { mime, data } => Some(AudioClip {
                    mime_type: mime,
                    data,
                }),
                _ => None,
            })
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::EmptyResponse).into())
    }
}
