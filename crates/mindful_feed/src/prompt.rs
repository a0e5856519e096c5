//! Visual prompt and caption synthesis.

use crate::ResolvedConfig;
use mindful_core::{GenerateRequest, GenerationRequest, VisualBrief};
use mindful_error::{
    GeminiErrorKind, GenerationError, GenerationErrorKind, GenerationStage, MindfulError,
    MindfulErrorKind,
};
use mindful_interface::JsonMode;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Response schema requiring exactly a visual prompt and a caption.
pub fn visual_brief_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "visualPrompt": {"type": "STRING"},
            "caption": {"type": "STRING"}
        },
        "required": ["visualPrompt", "caption"]
    })
}

fn brief_prompt(request: &GenerationRequest, resolved: &ResolvedConfig) -> String {
    format!(
        "Analyze this diary entry.\n\
         User Preferences:\n\
         - Art Style: {style}\n\
         - Tone: {tone}\n\
         - Format: {format}\n\n\
         Create a prompt that reflects the mood and content.\n\
         If format is VIDEO, write a prompt for a cinematic video scene.\n\
         If format is IMAGE, write a prompt for an AI image generator.\n\
         Also write a short, instagram-style caption in the requested tone.\n\n\
         Entry: \"{text}\"\n\
         Mood: {mood}",
        style = resolved.art_style,
        tone = resolved.caption_tone,
        format = resolved.output_format,
        text = request.text(),
        mood = request.mood(),
    )
}

/// Classify a structured-output failure.
fn prompt_failure(err: MindfulError) -> GenerationError {
    let stage = GenerationStage::Prompt;
    match err.kind() {
        MindfulErrorKind::Json(e) => {
            GenerationError::new(stage, GenerationErrorKind::MalformedOutput(e.message.clone()))
        }
        MindfulErrorKind::Gemini(e) if e.kind == GeminiErrorKind::EmptyResponse => {
            GenerationError::new(stage, GenerationErrorKind::MissingOutput("text".to_string()))
        }
        _ => GenerationError::service(stage, err),
    }
}

/// Derives a [`VisualBrief`] from an entry with one structured-output call.
#[derive(Debug)]
pub struct PromptSynthesizer<D: ?Sized> {
    driver: Arc<D>,
}

impl<D: ?Sized> Clone for PromptSynthesizer<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
        }
    }
}

impl<D> PromptSynthesizer<D>
where
    D: JsonMode + ?Sized,
{
    /// Create a synthesizer over a structured-output provider.
    pub fn new(driver: Arc<D>) -> Self {
        Self { driver }
    }

    /// Ask for a visual prompt and caption.
    ///
    /// # Errors
    ///
    /// Fails at the prompt stage when the entry is empty, the call fails or
    /// is cancelled, the response does not parse, or the visual prompt is
    /// empty.
    #[instrument(skip_all, fields(entry_id = %request.entry_id()))]
    pub async fn synthesize(
        &self,
        request: &GenerationRequest,
        resolved: &ResolvedConfig,
        cancel: &CancellationToken,
    ) -> Result<VisualBrief, GenerationError> {
        let stage = GenerationStage::Prompt;
        if request.text().trim().is_empty() {
            return Err(GenerationError::new(stage, GenerationErrorKind::EmptyEntry));
        }

        let call = GenerateRequest::prompt(brief_prompt(request, resolved));
        let schema = visual_brief_schema();
        let value = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(GenerationError::new(stage, GenerationErrorKind::Cancelled));
            }
            result = self.driver.generate_json(&call, &schema) => result.map_err(prompt_failure)?,
        };

        let brief: VisualBrief = serde_json::from_value(value).map_err(|e| {
            GenerationError::new(stage, GenerationErrorKind::MalformedOutput(e.to_string()))
        })?;

        if brief.visual_prompt.trim().is_empty() {
            return Err(GenerationError::new(
                stage,
                GenerationErrorKind::MissingOutput("visual prompt".to_string()),
            ));
        }

        debug!(
            prompt_len = brief.visual_prompt.len(),
            caption_len = brief.caption.len(),
            "Visual brief ready"
        );
        Ok(brief)
    }
}
