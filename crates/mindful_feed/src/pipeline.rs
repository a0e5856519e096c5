//! Orchestration of a feed generation run.

use crate::{
    ConfigResolver, FeedDriver, FeedPostAssembler, MediaGenerator, NarrationGenerator,
    PromptSynthesizer,
};
use mindful_config::PipelineSettings;
use mindful_core::{FeedPost, GenerationRequest};
use mindful_error::{GenerationError, GenerationErrorKind, GenerationStage};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Turns diary entries into feed posts.
///
/// Runs share nothing mutable, so one pipeline can serve concurrent runs.
pub struct FeedPipeline<D: ?Sized> {
    resolver: ConfigResolver,
    prompt: PromptSynthesizer<D>,
    media: MediaGenerator<D>,
    narration: NarrationGenerator<D>,
}

impl<D> FeedPipeline<D>
where
    D: FeedDriver + ?Sized + 'static,
{
    /// Create a pipeline over one provider.
    pub fn new(driver: Arc<D>, settings: &PipelineSettings) -> Self {
        Self {
            resolver: ConfigResolver::new(settings.video_resolution.clone()),
            prompt: PromptSynthesizer::new(Arc::clone(&driver)),
            media: MediaGenerator::new(
                Arc::clone(&driver),
                settings.poll_interval(),
                settings.video_deadline(),
            ),
            narration: NarrationGenerator::new(driver, settings.voice),
        }
    }

    /// Run every stage and return the assembled post.
    ///
    /// Media and narration run concurrently once the brief is ready. A
    /// narration failure is logged and the post is published without audio,
    /// unless the run was cancelled, in which case nothing is assembled.
    ///
    /// # Errors
    ///
    /// Returns the first fatal failure: an empty entry, a prompt-stage
    /// failure, a media-stage failure, or cancellation.
    #[instrument(
        skip_all,
        fields(
            entry_id = %request.entry_id(),
            format = %request.config().output_format,
            attachments = request.attachments().len()
        )
    )]
    pub async fn run(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<FeedPost, GenerationError> {
        if request.text().trim().is_empty() {
            return Err(GenerationError::new(
                GenerationStage::Prompt,
                GenerationErrorKind::EmptyEntry,
            ));
        }
        if cancel.is_cancelled() {
            return Err(GenerationError::new(
                GenerationStage::Prompt,
                GenerationErrorKind::Cancelled,
            ));
        }

        let resolved = self.resolver.resolve(request.config());
        let brief = self.prompt.synthesize(request, &resolved, cancel).await?;
        info!(caption = %brief.caption, "Brief synthesized");

        let (media, narration) = tokio::join!(
            self.media.generate(request, &resolved, &brief, cancel),
            self.narration.narrate(request, &resolved, cancel),
        );

        let media = media?;
        let narration = match narration {
            Ok(clip) => clip,
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                warn!(error = %e, "Narration failed, publishing without audio");
                None
            }
        };
        if cancel.is_cancelled() {
            return Err(GenerationError::new(
                GenerationStage::Narration,
                GenerationErrorKind::Cancelled,
            ));
        }

        let post = FeedPostAssembler::assemble(request, brief, media, narration);
        info!(
            post_id = %post.id(),
            with_audio = post.narration_audio().is_some(),
            "Feed post assembled"
        );
        Ok(post)
    }

    /// Like [`run`](Self::run), but reports failure as "nothing produced".
    pub async fn run_or_nothing(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Option<FeedPost> {
        match self.run(request, cancel).await {
            Ok(post) => Some(post),
            Err(e) if e.is_cancelled() => {
                info!(stage = %e.stage, "Generation cancelled");
                None
            }
            Err(e) => {
                warn!(error = %e, "Generation produced no post");
                None
            }
        }
    }
}
