//! Optional spoken narration.

use crate::ResolvedConfig;
use mindful_core::{AudioClip, GenerationRequest, VoiceName};
use mindful_error::{GenerationError, GenerationErrorKind, GenerationStage};
use mindful_interface::SpeechSynthesis;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

fn narration_prompt(request: &GenerationRequest) -> String {
    format!(
        "Retell the following diary entry as a short, first-person audio story. \
         Match the tone to the mood: {}. Keep it under 45 seconds. Entry: \"{}\"",
        request.mood(),
        request.text()
    )
}

/// Synthesizes a short first-person retelling of an entry.
pub struct NarrationGenerator<D: ?Sized> {
    driver: Arc<D>,
    voice: VoiceName,
}

impl<D: ?Sized> Clone for NarrationGenerator<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            voice: self.voice,
        }
    }
}

impl<D> NarrationGenerator<D>
where
    D: SpeechSynthesis + ?Sized,
{
    /// Create a narrator speaking with `voice`.
    pub fn new(driver: Arc<D>, voice: VoiceName) -> Self {
        Self { driver, voice }
    }

    /// Voice used for narration.
    pub fn voice(&self) -> VoiceName {
        self.voice
    }

    /// Narrate the entry if audio was requested.
    ///
    /// Returns `Ok(None)` without calling the service when audio is off.
    /// Errors are narration-stage failures, which callers treat as
    /// "no narration".
    #[instrument(skip_all, fields(voice = %self.voice, include_audio = resolved.include_audio))]
    pub async fn narrate(
        &self,
        request: &GenerationRequest,
        resolved: &ResolvedConfig,
        cancel: &CancellationToken,
    ) -> Result<Option<AudioClip>, GenerationError> {
        let stage = GenerationStage::Narration;
        if !resolved.include_audio {
            debug!("Narration not requested");
            return Ok(None);
        }

        let prompt = narration_prompt(request);
        let clip = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(GenerationError::new(stage, GenerationErrorKind::Cancelled));
            }
            result = self.driver.synthesize(&prompt, self.voice) => result
                .map_err(|e| GenerationError::service(stage, e))?,
        };

        if clip.data.is_empty() {
            return Err(GenerationError::new(
                stage,
                GenerationErrorKind::MissingOutput("audio".to_string()),
            ));
        }

        debug!(bytes = clip.data.len(), mime = %clip.mime_type, "Narration ready");
        Ok(Some(clip))
    }
}
