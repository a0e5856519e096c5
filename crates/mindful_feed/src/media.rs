//! Image and video generation.

use crate::{ResolvedConfig, VideoRenderJob};
use mindful_core::{
    GenerationRequest, Input, MediaPayload, MediaResult, MediaSource, OutputFormat, Output,
    VisualBrief,
};
use mindful_error::{GenerationError, GenerationErrorKind, GenerationStage};
use mindful_interface::{ImageGeneration, VideoGeneration, VideoMode, VideoRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Most attachments forwarded as reference images.
pub const MAX_REFERENCE_IMAGES: usize = 3;

/// The first [`MAX_REFERENCE_IMAGES`] image attachments, in attachment order.
pub fn reference_images(request: &GenerationRequest) -> Vec<MediaPayload> {
    request
        .image_attachments()
        .take(MAX_REFERENCE_IMAGES)
        .map(|a| MediaPayload::new(a.mime_type.clone(), a.data.clone()))
        .collect()
}

fn media_error(kind: GenerationErrorKind) -> GenerationError {
    GenerationError::new(GenerationStage::Media, kind)
}

/// Produces exactly one [`MediaResult`] for a run.
pub struct MediaGenerator<D: ?Sized> {
    driver: Arc<D>,
    poll_interval: Duration,
    video_deadline: Duration,
}

impl<D: ?Sized> Clone for MediaGenerator<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            poll_interval: self.poll_interval,
            video_deadline: self.video_deadline,
        }
    }
}

impl<D> MediaGenerator<D>
where
    D: ImageGeneration + VideoGeneration + ?Sized + 'static,
{
    /// Create a generator that polls video jobs every `poll_interval` and
    /// gives up after `video_deadline`.
    pub fn new(driver: Arc<D>, poll_interval: Duration, video_deadline: Duration) -> Self {
        Self {
            driver,
            poll_interval,
            video_deadline,
        }
    }

    /// Render the brief in the resolved output format.
    #[instrument(skip_all, fields(format = %resolved.output_format))]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        resolved: &ResolvedConfig,
        brief: &VisualBrief,
        cancel: &CancellationToken,
    ) -> Result<MediaResult, GenerationError> {
        if cancel.is_cancelled() {
            return Err(media_error(GenerationErrorKind::Cancelled));
        }
        match resolved.output_format {
            OutputFormat::Image => self
                .generate_image(request, resolved, brief, cancel)
                .await
                .map(MediaResult::Image),
            OutputFormat::Video => self
                .generate_video(request, resolved, brief, cancel)
                .await
                .map(MediaResult::Video),
        }
    }

    async fn generate_image(
        &self,
        request: &GenerationRequest,
        resolved: &ResolvedConfig,
        brief: &VisualBrief,
        cancel: &CancellationToken,
    ) -> Result<MediaPayload, GenerationError> {
        let references = reference_images(request);
        let prompt = resolved.image_prompt(&brief.visual_prompt, !references.is_empty());

        let mut parts: Vec<Input> = references
            .into_iter()
            .map(|image| Input::Image {
                mime: image.mime_type,
                source: MediaSource::Binary(image.data),
            })
            .collect();
        debug!(references = parts.len(), "Requesting image");
        parts.push(Input::Text(prompt));

        let outputs = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(media_error(GenerationErrorKind::Cancelled)),
            result = self.driver.generate_image(&parts, resolved.image_aspect_ratio) => result
                .map_err(|e| GenerationError::service(GenerationStage::Media, e))?,
        };

        let image = outputs
            .into_iter()
            .find_map(|output| match output {
                Output::Image { mime, data } if !data.is_empty() => {
                    Some(MediaPayload::new(mime, data))
                }
                _ => None,
            })
            .ok_or_else(|| media_error(GenerationErrorKind::MissingOutput("image".to_string())))?;

        info!(bytes = image.data.len(), mime = %image.mime_type, "Image generated");
        Ok(image)
    }

    async fn generate_video(
        &self,
        request: &GenerationRequest,
        resolved: &ResolvedConfig,
        brief: &VisualBrief,
        cancel: &CancellationToken,
    ) -> Result<MediaPayload, GenerationError> {
        let references = reference_images(request);
        let mode = if references.is_empty() {
            VideoMode::TextOnly
        } else {
            VideoMode::ReferenceConditioned
        };
        let prompt = resolved.video_prompt(&brief.visual_prompt, !references.is_empty());

        let video_request = VideoRequest::builder()
            .prompt(prompt)
            .mode(mode)
            .reference_images(references)
            .resolution(resolved.video_resolution.clone())
            .aspect_ratio(resolved.video_aspect_ratio)
            .build()
            .map_err(|e| media_error(GenerationErrorKind::Service(e.to_string())))?;

        // Polling stops if this future is dropped before the job finishes.
        let job_cancel = cancel.child_token();
        let _abandon = job_cancel.clone().drop_guard();

        let job = VideoRenderJob::submit(
            Arc::clone(&self.driver),
            &video_request,
            self.poll_interval,
            self.video_deadline,
            job_cancel,
        )
        .await?;

        job.spawn().join().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindful_core::{Attachment, AttachmentKind, GenerationConfig, Mood};

    fn attachment(id: &str, kind: AttachmentKind, mime: &str) -> Attachment {
        Attachment {
            id: id.to_string(),
            kind,
            mime_type: mime.to_string(),
            data: id.as_bytes().to_vec(),
            name: format!("{}.bin", id),
        }
    }

    #[test]
    fn test_reference_images_skip_documents_and_cap_at_three() {
        let request = GenerationRequest::new(
            "e1",
            "text",
            Mood::Neutral,
            vec![
                attachment("a", AttachmentKind::Image, "image/png"),
                attachment("doc", AttachmentKind::Pdf, "application/pdf"),
                attachment("b", AttachmentKind::Image, "image/jpeg"),
                attachment("c", AttachmentKind::Image, "image/png"),
                attachment("d", AttachmentKind::Image, "image/png"),
            ],
            GenerationConfig::default(),
        );

        let references = reference_images(&request);
        assert_eq!(references.len(), MAX_REFERENCE_IMAGES);
        assert_eq!(references[0].data, b"a".to_vec());
        assert_eq!(references[1].mime_type, "image/jpeg");
        assert_eq!(references[2].data, b"c".to_vec());
    }
}
